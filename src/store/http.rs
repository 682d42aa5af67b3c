// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{BlobStore, StoreError};
use crate::utils::{extension_for, http_client};
use reqwest::header::CONTENT_TYPE;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Receipt uploads to a storage bucket exposed over HTTP
/// (`/storage/v1/object/{bucket}/{object}`), returning the public URL.
pub struct HttpBlobStore {
    client: reqwest::blocking::Client,
    base_url: String,
    bucket: String,
    token: Option<String>,
}

impl HttpBlobStore {
    pub fn new(base_url: &str, bucket: &str, token: Option<String>) -> Result<Self, StoreError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.trim_matches('/').to_string(),
            token,
        })
    }

    pub fn object_name(content_type: &str) -> String {
        let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
        format!(
            "receipts/{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            seq,
            extension_for(content_type)
        )
    }

    pub fn upload_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, object
        )
    }

    pub fn public_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object
        )
    }
}

impl BlobStore for HttpBlobStore {
    fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        let object = Self::object_name(content_type);
        let mut req = self
            .client
            .post(self.upload_url(&object))
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        let url = self.public_url(&object);
        info!(%url, size = bytes.len(), "uploaded receipt");
        Ok(url)
    }
}
