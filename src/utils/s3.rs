use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_config::ConfigLoader;
use aws_types::region::Region;
use aws_config::BehaviorVersion;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::utils::photo::{InlineImage, PhotoUploader};

const PHOTO_PREFIX: &str = "employee_photos";

pub async fn create_s3_client(config: &Config) -> S3Client {
    let aws_config = ConfigLoader::default()
        .region(config.aws_region.clone().map(Region::new))
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await;

    S3Client::new(&aws_config)
}

pub struct S3PhotoStore {
    client: S3Client,
    bucket: String,
}

impl S3PhotoStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    fn object_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
    }
}

#[async_trait]
impl PhotoUploader for S3PhotoStore {
    async fn upload(&self, image: InlineImage) -> Result<String, AppError> {
        let key = format!("{}/{}.{}", PHOTO_PREFIX, Uuid::new_v4(), image.extension);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(image.mime_type)
            .body(image.bytes.into())
            .send()
            .await
            .map_err(|err| AppError::Upstream(format!("Failed to upload file: {}", err)))?;

        Ok(self.object_url(&key))
    }
}
