//! Pod specification builder
//!
//! Builds the version-3 pod spec Juju expects on `pod-spec-set`: one
//! workload container, an Opaque secret carrying the SA password, and the
//! service-account role the workload needs. The spec is rebuilt from
//! scratch on every invocation and submitted fire-and-forget; nothing is
//! diffed or merged with a previous submission.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use k8s_openapi::api::rbac::v1::PolicyRule;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::Result;

pub const SPEC_VERSION: u32 = 3;

/// Name of the Kubernetes secret holding the SA password
pub const SECRET_NAME: &str = "mssql";

/// Key under which the password is stored in the secret
pub const SA_PASSWORD_KEY: &str = "SA_PASSWORD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub version: u32,
    pub containers: Vec<ContainerSpec>,
    pub kubernetes_resources: KubernetesResources,
    pub service_account: ServiceAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub ports: Vec<Value>,
    pub env_config: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubernetesResources {
    pub secrets: Vec<SecretSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub secret_type: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub global: bool,
    pub rules: Vec<PolicyRule>,
}

impl PodSpec {
    /// Serialize to the YAML form `pod-spec-set` consumes
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Build the pod spec from pre-validated inputs.
///
/// `env_config` is the merged operator-supplied container configuration;
/// the fixed EULA, product id, and secret-reference keys are written on
/// top of it and win on collision.
pub fn build(
    app_name: &str,
    image: &str,
    ports: Vec<Value>,
    env_config: BTreeMap<String, Value>,
    sa_password: &str,
) -> PodSpec {
    let mut env_config = env_config;
    env_config.insert("ACCEPT_EULA".to_string(), Value::from("Y"));
    env_config.insert("MSSQL_PID".to_string(), Value::from("developer"));
    env_config.insert("mssql-secret".to_string(), secret_env_ref(SECRET_NAME));

    let mut data = BTreeMap::new();
    data.insert(SA_PASSWORD_KEY.to_string(), BASE64.encode(sa_password));

    PodSpec {
        version: SPEC_VERSION,
        containers: vec![ContainerSpec {
            name: app_name.to_string(),
            image: image.to_string(),
            ports,
            env_config,
        }],
        kubernetes_resources: KubernetesResources {
            secrets: vec![SecretSpec {
                name: SECRET_NAME.to_string(),
                secret_type: "Opaque".to_string(),
                data,
            }],
        },
        service_account: ServiceAccount {
            roles: vec![Role {
                global: true,
                rules: role_rules(),
            }],
        },
    }
}

/// `envConfig` value that injects every key of a named secret
fn secret_env_ref(name: &str) -> Value {
    let mut secret = serde_yaml::Mapping::new();
    secret.insert(Value::from("name"), Value::from(name));

    let mut env_ref = serde_yaml::Mapping::new();
    env_ref.insert(Value::from("secret"), Value::Mapping(secret));
    Value::Mapping(env_ref)
}

/// Role rules the workload needs to manage its own resources
fn role_rules() -> Vec<PolicyRule> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        PolicyRule {
            api_groups: Some(strings(&["apps"])),
            resources: Some(strings(&["statefulsets", "deployments"])),
            verbs: strings(&["*"]),
            ..PolicyRule::default()
        },
        PolicyRule {
            api_groups: Some(strings(&[""])),
            resources: Some(strings(&["pods", "pods/exec"])),
            verbs: strings(&["create", "get", "list", "watch", "update", "patch"]),
            ..PolicyRule::default()
        },
        PolicyRule {
            api_groups: Some(strings(&[""])),
            resources: Some(strings(&["configmaps"])),
            verbs: strings(&["get", "watch", "list"]),
            ..PolicyRule::default()
        },
        PolicyRule {
            api_groups: Some(strings(&[""])),
            resources: Some(strings(&["persistentvolumeclaims"])),
            verbs: strings(&["create", "delete"]),
            ..PolicyRule::default()
        },
    ]
}
