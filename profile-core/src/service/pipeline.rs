// service/pipeline.rs
// Classify-then-encrypt for one address. Each run gets its own vault session.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use profile_common::{encode_fields, EncodedFields};

use super::errors::ServiceError;
use super::profile_builder::{ProfileBuilder, ProfileReport};
use crate::vault::{CipherSuite, EncryptedProfile, PeerKeySource, VaultError, VaultSession};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub report: ProfileReport,
    pub fields: EncodedFields,
    pub encrypted: EncryptedProfile,
}

pub struct ProfilePipeline {
    builder: ProfileBuilder,
    suite: Arc<dyn CipherSuite>,
    peer: Arc<dyn PeerKeySource>,
}

impl ProfilePipeline {
    pub fn new(builder: ProfileBuilder, suite: Arc<dyn CipherSuite>, peer: Arc<dyn PeerKeySource>) -> Self {
        Self {
            builder,
            suite,
            peer,
        }
    }

    pub async fn run(&self, address: &str) -> Result<PipelineOutput, ServiceError> {
        let report = self.builder.build(address).await?;
        if report.is_degraded() {
            warn!(
                "Profile for {} is degraded ({} metric(s) defaulted); tier may be under-estimated",
                report.address,
                report.degraded.len()
            );
        }

        let fields = encode_fields(&report.profile)
            .map_err(|e| ServiceError::Encryption(VaultError::Encoding(e)))?;
        if !fields.fits_storage_widths() {
            warn!("Encoded fields exceed vault storage widths: {:?}", fields.values());
        }

        let mut session = VaultSession::new(self.suite.clone());
        session
            .handshake(self.peer.as_ref())
            .await
            .map_err(ServiceError::Handshake)?;

        let encrypted = session
            .encrypt_fields(&fields)
            .map_err(ServiceError::Encryption)?;

        info!(
            "Encrypted {} fields for {} (tier {})",
            encrypted.field_count, report.address, report.profile.tier()
        );

        Ok(PipelineOutput {
            report,
            fields,
            encrypted,
        })
    }
}
