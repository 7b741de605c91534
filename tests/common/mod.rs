//! Shared test double for the Juju hook-tool surface

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use mssql_charm::backend::HookTools;
use mssql_charm::config::CharmConfig;
use mssql_charm::error::Result;
use mssql_charm::podspec::PodSpec;
use mssql_charm::status::UnitStatus;

/// Recording backend: configurable inputs, captured outputs
pub struct MockTools {
    pub app: String,
    pub leader: bool,
    pub config: CharmConfig,
    pub relation_data: BTreeMap<String, String>,
    pub statuses: RefCell<Vec<UnitStatus>>,
    pub specs: RefCell<Vec<PodSpec>>,
}

impl MockTools {
    pub fn leader_with_config(config: CharmConfig) -> Self {
        Self {
            app: "mssql".to_string(),
            leader: true,
            config,
            relation_data: BTreeMap::new(),
            statuses: RefCell::new(Vec::new()),
            specs: RefCell::new(Vec::new()),
        }
    }

    pub fn non_leader_with_config(config: CharmConfig) -> Self {
        Self {
            leader: false,
            ..Self::leader_with_config(config)
        }
    }

    pub fn last_status(&self) -> UnitStatus {
        self.statuses
            .borrow()
            .last()
            .cloned()
            .expect("no status was set")
    }

    pub fn submitted_specs(&self) -> Vec<PodSpec> {
        self.specs.borrow().clone()
    }
}

impl HookTools for MockTools {
    fn app_name(&self) -> &str {
        &self.app
    }

    fn config(&self) -> Result<CharmConfig> {
        Ok(self.config.clone())
    }

    fn is_leader(&self) -> Result<bool> {
        Ok(self.leader)
    }

    fn set_status(&self, status: &UnitStatus) -> Result<()> {
        self.statuses.borrow_mut().push(status.clone());
        Ok(())
    }

    fn set_pod_spec(&self, spec: &PodSpec) -> Result<()> {
        self.specs.borrow_mut().push(spec.clone());
        Ok(())
    }

    fn relation_snapshot(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.relation_data.clone())
    }
}

/// Configuration that passes every check
pub fn valid_config() -> CharmConfig {
    CharmConfig {
        image: "mssql:latest".to_string(),
        ports: "[{name: tds, containerPort: 1433}]".to_string(),
        container_config: String::new(),
        container_secrets: String::new(),
        sa_password: "Valid123!".to_string(),
    }
}
