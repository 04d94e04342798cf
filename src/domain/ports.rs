use crate::domain::model::{Digest, FixtureRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use std::sync::Arc;

pub trait ConfigProvider: Send + Sync {
    fn provider_base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn timezone(&self) -> Tz;
    fn zone_label(&self) -> &str;
    fn min_score(&self) -> u32;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    fn provider_base_url(&self) -> &str {
        (**self).provider_base_url()
    }

    fn api_key(&self) -> &str {
        (**self).api_key()
    }

    fn timezone(&self) -> Tz {
        (**self).timezone()
    }

    fn zone_label(&self) -> &str {
        (**self).zone_label()
    }

    fn min_score(&self) -> u32 {
        (**self).min_score()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<FixtureRecord>>;
    async fn transform(&self, records: Vec<FixtureRecord>) -> Result<Digest>;
    async fn load(&self, digest: Digest) -> Result<String>;
}
