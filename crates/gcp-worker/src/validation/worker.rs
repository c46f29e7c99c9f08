/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

use std::collections::HashSet;
use std::str::FromStr;

use field::{ErrorList, FieldError, Path};
use strum::VariantNames;

use crate::apis::{
    DataVolume, DiskEncryption, Gpu, LocalSsdInterface, ServiceAccount, VOLUME_TYPE_SCRATCH,
    WorkerConfig,
};

fn provider_path() -> Path {
    Path::new("providerConfig")
}

fn volume_path() -> Path {
    provider_path().child("volume")
}

/// Validates the provider config of a worker pool together with the data
/// volumes declared on the pool
///
/// Errors are returned in a fixed order: all data volume errors in the order
/// of `data_volumes`, followed by GPU, service account and disk encryption
/// errors.
#[tracing::instrument(level = "debug", skip_all, fields(data_volumes = data_volumes.len()))]
pub fn validate_worker_config(
    config: Option<&WorkerConfig>,
    data_volumes: &[DataVolume],
) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let data_volumes_path = Path::new("dataVolumes");
    for (i, volume) in data_volumes.iter().enumerate() {
        all_errs.append(validate_data_volume(
            config,
            volume,
            &data_volumes_path.index(i),
        ));
    }

    if let Some(config) = config {
        let provider = provider_path();
        all_errs.append(validate_gpu(config.gpu.as_ref(), &provider.child("gpu")));
        all_errs.append(validate_service_account(
            config.service_account.as_ref(),
            &provider.child("serviceAccount"),
        ));
        if let Some(volume) = &config.volume {
            all_errs.append(validate_disk_encryption(
                volume.encryption.as_ref(),
                &volume_path().child("encryption"),
            ));
        }
    }

    tracing::debug!(violations = all_errs.len(), "Validated worker config");
    all_errs
}

pub fn validate_gpu(gpu: Option<&Gpu>, path: &Path) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let Some(gpu) = gpu else {
        return all_errs;
    };

    if gpu.accelerator_type.is_empty() {
        all_errs.push(FieldError::required(
            path.child("acceleratorType"),
            "must be set when providing gpu",
        ));
    }

    if gpu.count <= 0 {
        all_errs.push(FieldError::forbidden(
            path.child("count"),
            "must be > 0 when providing gpu",
        ));
    }

    all_errs
}

pub fn validate_service_account(sa: Option<&ServiceAccount>, path: &Path) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let Some(sa) = sa else {
        return all_errs;
    };

    if sa.email.is_empty() {
        all_errs.push(FieldError::required(
            path.child("email"),
            "must be set when providing service account",
        ));
    }

    let scopes_path = path.child("scopes");
    if sa.scopes.is_empty() {
        all_errs.push(FieldError::required(
            scopes_path,
            "must have at least one scope",
        ));
        return all_errs;
    }

    let mut existing_scopes = HashSet::new();
    for (i, scope) in sa.scopes.iter().enumerate() {
        if scope.is_empty() {
            all_errs.push(FieldError::required(
                scopes_path.index(i),
                "must not be empty",
            ));
        } else if !existing_scopes.insert(scope.as_str()) {
            all_errs.push(FieldError::duplicate(scopes_path.index(i), scope.as_str()));
        }
    }

    all_errs
}

/// Validates the disk encryption settings of a volume
///
/// Only customer managed keys (CMEK) can be configured right now, so a
/// present encryption block always needs a key name. Customer supplied keys
/// (CSEK) would need their own checks here.
pub fn validate_disk_encryption(encryption: Option<&DiskEncryption>, path: &Path) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let Some(encryption) = encryption else {
        return all_errs;
    };

    let has_key_name = encryption
        .kms_key_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !has_key_name {
        all_errs.push(FieldError::required(
            path.child("kmsKeyName"),
            "must be specified when configuring disk encryption",
        ));
    }

    all_errs
}

/// Validates a single data volume against the worker's volume settings
///
/// Errors about the local SSD interface and the disk encryption refer to the
/// shared `providerConfig.volume` block, not to the data volume at `path`.
/// Several SCRATCH volumes therefore report under the same field path.
pub fn validate_data_volume(
    config: Option<&WorkerConfig>,
    volume: &DataVolume,
    path: &Path,
) -> ErrorList {
    let mut all_errs = ErrorList::new();

    let Some(volume_type) = volume.volume_type.as_deref() else {
        all_errs.push(FieldError::required(path.child("type"), "must not be empty"));
        return all_errs;
    };

    let worker_volume = config.and_then(|config| config.volume.as_ref());
    let interface = worker_volume.and_then(|v| v.local_ssd_interface.as_deref());

    if volume_type == VOLUME_TYPE_SCRATCH {
        match interface {
            None => all_errs.push(FieldError::required(
                volume_path().child("interface"),
                format!("must be set when using {VOLUME_TYPE_SCRATCH} volumes"),
            )),
            Some(interface) if LocalSsdInterface::from_str(interface).is_err() => {
                all_errs.push(FieldError::not_supported(
                    volume_path().child("interface"),
                    interface,
                    LocalSsdInterface::VARIANTS,
                ))
            }
            Some(_) => {}
        }

        if let Some(encryption) = worker_volume.and_then(|v| v.encryption.as_ref()) {
            all_errs.push(FieldError::invalid(
                volume_path().child("encryption"),
                serde_json::to_value(encryption).unwrap_or_default(),
                format!("must not be set in combination with {VOLUME_TYPE_SCRATCH} volumes"),
            ));
        }
    } else if let Some(interface) = interface {
        all_errs.push(FieldError::invalid(
            volume_path().child("interface"),
            interface,
            format!("is only allowed for type {VOLUME_TYPE_SCRATCH}"),
        ));
    }

    all_errs
}

#[cfg(test)]
mod tests {
    use field::ErrorType;
    use serde_json::json;

    use super::*;
    use crate::apis::Volume;

    fn data_volume(volume_type: Option<&str>) -> DataVolume {
        DataVolume {
            name: "data".to_string(),
            volume_type: volume_type.map(str::to_string),
            volume_size: "20Gi".to_string(),
            encrypted: None,
        }
    }

    fn config_with_volume(interface: Option<&str>, kms_key_name: Option<&str>) -> WorkerConfig {
        WorkerConfig {
            volume: Some(Volume {
                local_ssd_interface: interface.map(str::to_string),
                encryption: kms_key_name.map(|name| DiskEncryption {
                    kms_key_name: Some(name.to_string()),
                }),
            }),
            ..Default::default()
        }
    }

    fn service_account(scopes: &[&str]) -> ServiceAccount {
        ServiceAccount {
            email: "worker@project.iam.gserviceaccount.com".to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fields(errors: &ErrorList) -> Vec<String> {
        errors.iter().map(|e| e.field.to_string()).collect()
    }

    #[test]
    fn absent_config_without_volumes_is_valid() {
        assert!(validate_worker_config(None, &[]).is_empty());
        assert!(validate_worker_config(Some(&WorkerConfig::default()), &[]).is_empty());
    }

    #[test]
    fn complete_scratch_config_is_valid() {
        let config = WorkerConfig {
            gpu: Some(Gpu {
                accelerator_type: "nvidia-tesla-t4".to_string(),
                count: 1,
            }),
            service_account: Some(service_account(&[
                "https://www.googleapis.com/auth/cloud-platform",
            ])),
            ..config_with_volume(Some("NVME"), None)
        };

        let errors = validate_worker_config(Some(&config), &[data_volume(Some("SCRATCH"))]);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn data_volume_without_type_stops_after_one_error() {
        // Would otherwise trip the interface check
        let config = config_with_volume(Some("NVME"), None);
        let errors = validate_worker_config(
            Some(&config),
            &[data_volume(Some("SCRATCH")), data_volume(None)],
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::Required);
        assert_eq!(errors[0].field.to_string(), "dataVolumes[1].type");
        assert_eq!(errors[0].detail, "must not be empty");
    }

    #[test]
    fn gpu_requires_accelerator_type_and_positive_count() {
        let path = Path::new("providerConfig").child("gpu");
        assert!(validate_gpu(None, &path).is_empty());

        let errors = validate_gpu(Some(&Gpu::default()), &path);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ErrorType::Required);
        assert_eq!(errors[0].field.to_string(), "providerConfig.gpu.acceleratorType");
        assert_eq!(errors[1].kind, ErrorType::Forbidden);
        assert_eq!(errors[1].field.to_string(), "providerConfig.gpu.count");
        assert_eq!(errors[1].detail, "must be > 0 when providing gpu");

        let errors = validate_gpu(
            Some(&Gpu {
                accelerator_type: "nvidia-tesla-a100".to_string(),
                count: -1,
            }),
            &path,
        );
        assert_eq!(fields(&errors), vec!["providerConfig.gpu.count"]);
    }

    #[test]
    fn service_account_reports_duplicate_scopes() {
        let path = Path::new("providerConfig").child("serviceAccount");
        let errors = validate_service_account(Some(&service_account(&["a", "a", "b"])), &path);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::Duplicate);
        assert_eq!(
            errors[0].field.to_string(),
            "providerConfig.serviceAccount.scopes[1]"
        );
        assert_eq!(errors[0].bad_value, Some(json!("a")));
    }

    #[test]
    fn service_account_requires_email_and_scopes() {
        let path = Path::new("providerConfig").child("serviceAccount");
        let errors = validate_service_account(Some(&ServiceAccount::default()), &path);

        assert_eq!(
            fields(&errors),
            vec![
                "providerConfig.serviceAccount.email",
                "providerConfig.serviceAccount.scopes",
            ]
        );
        assert!(errors.iter().all(|e| e.kind == ErrorType::Required));
        assert_eq!(errors[1].detail, "must have at least one scope");
    }

    #[test]
    fn empty_scopes_are_required_and_never_count_as_duplicates() {
        let path = Path::new("serviceAccount");
        let errors = validate_service_account(Some(&service_account(&["", "x", "", "x"])), &path);

        let kinds = errors.iter().map(|e| e.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![ErrorType::Required, ErrorType::Required, ErrorType::Duplicate]
        );
        assert_eq!(
            fields(&errors),
            vec![
                "serviceAccount.scopes[0]",
                "serviceAccount.scopes[2]",
                "serviceAccount.scopes[3]",
            ]
        );
    }

    #[test]
    fn disk_encryption_requires_non_blank_key_name() {
        let path = Path::new("providerConfig")
            .child("volume")
            .child("encryption");
        assert!(validate_disk_encryption(None, &path).is_empty());

        for kms_key_name in [None, Some(""), Some("   "), Some("\t\n")] {
            let encryption = DiskEncryption {
                kms_key_name: kms_key_name.map(str::to_string),
            };
            let errors = validate_disk_encryption(Some(&encryption), &path);
            assert_eq!(errors.len(), 1, "{kms_key_name:?}");
            assert_eq!(errors[0].kind, ErrorType::Required);
            assert_eq!(
                errors[0].field.to_string(),
                "providerConfig.volume.encryption.kmsKeyName"
            );
        }

        let encryption = DiskEncryption {
            kms_key_name: Some("projects/p/locations/l/keyRings/r/cryptoKeys/k".to_string()),
        };
        assert!(validate_disk_encryption(Some(&encryption), &path).is_empty());
    }

    #[test]
    fn scratch_volume_requires_interface() {
        let errors = validate_worker_config(None, &[data_volume(Some("SCRATCH"))]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::Required);
        assert_eq!(errors[0].field.to_string(), "providerConfig.volume.interface");
        assert_eq!(errors[0].detail, "must be set when using SCRATCH volumes");

        let config = config_with_volume(None, None);
        let errors = validate_worker_config(Some(&config), &[data_volume(Some("SCRATCH"))]);
        assert_eq!(fields(&errors), vec!["providerConfig.volume.interface"]);
    }

    #[test]
    fn scratch_volume_rejects_unknown_interface() {
        let config = config_with_volume(Some("HDD"), None);
        let errors = validate_worker_config(Some(&config), &[data_volume(Some("SCRATCH"))]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::NotSupported);
        assert_eq!(errors[0].bad_value, Some(json!("HDD")));
        assert!(errors[0].detail.contains("\"NVME\""));
        assert!(errors[0].detail.contains("\"SCSI\""));

        // Interface names are case sensitive
        let config = config_with_volume(Some("nvme"), None);
        let errors = validate_worker_config(Some(&config), &[data_volume(Some("SCRATCH"))]);
        assert_eq!(errors[0].kind, ErrorType::NotSupported);
    }

    #[test]
    fn scratch_volume_rejects_disk_encryption() {
        let config = config_with_volume(Some("SCSI"), Some("key"));
        let errors = validate_worker_config(Some(&config), &[data_volume(Some("SCRATCH"))]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::Invalid);
        assert_eq!(errors[0].field.to_string(), "providerConfig.volume.encryption");
        assert_eq!(errors[0].bad_value, Some(json!({"kmsKeyName": "key"})));
        assert_eq!(
            errors[0].detail,
            "must not be set in combination with SCRATCH volumes"
        );
    }

    #[test]
    fn non_scratch_volume_rejects_interface() {
        let config = config_with_volume(Some("NVME"), None);
        let errors = validate_worker_config(Some(&config), &[data_volume(Some("pd-ssd"))]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::Invalid);
        assert_eq!(errors[0].field.to_string(), "providerConfig.volume.interface");
        assert_eq!(errors[0].bad_value, Some(json!("NVME")));
        assert_eq!(errors[0].detail, "is only allowed for type SCRATCH");
    }

    #[test]
    fn scratch_volumes_share_the_volume_path() {
        let errors = validate_worker_config(
            None,
            &[data_volume(Some("SCRATCH")), data_volume(Some("SCRATCH"))],
        );
        assert_eq!(
            fields(&errors),
            vec![
                "providerConfig.volume.interface",
                "providerConfig.volume.interface",
            ]
        );
    }

    #[test]
    fn errors_follow_traversal_order() {
        let config = WorkerConfig {
            gpu: Some(Gpu::default()),
            service_account: Some(service_account(&[])),
            volume: Some(Volume {
                local_ssd_interface: None,
                encryption: Some(DiskEncryption { kms_key_name: None }),
            }),
        };
        let errors = validate_worker_config(
            Some(&config),
            &[data_volume(None), data_volume(Some("SCRATCH"))],
        );

        assert_eq!(
            fields(&errors),
            vec![
                "dataVolumes[0].type",
                "providerConfig.volume.interface",
                "providerConfig.volume.encryption",
                "providerConfig.gpu.acceleratorType",
                "providerConfig.gpu.count",
                "providerConfig.serviceAccount.scopes",
                "providerConfig.volume.encryption.kmsKeyName",
            ]
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let config = config_with_volume(Some("HDD"), Some("  "));
        let volumes = [data_volume(Some("SCRATCH")), data_volume(None)];

        let first = validate_worker_config(Some(&config), &volumes);
        let second = validate_worker_config(Some(&config), &volumes);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
