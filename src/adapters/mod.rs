// Adapters layer: the messaging transport the pipeline is exposed through.

pub mod telegram;
