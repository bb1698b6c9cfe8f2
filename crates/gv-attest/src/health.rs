//! # Service-Health Monitor
//!
//! Process-wide connectivity mode plus a status per external dependency.
//! Ledger-touching operations consult the monitor before doing any work:
//!
//! - [`HealthMonitor::ensure_online`] refuses when the mode is offline.
//! - [`HealthMonitor::ensure_ledger`] additionally refuses unless the proof
//!   ledger is `ok`. A degraded ledger takes no registrations.
//!
//! Every transition goes through one `parking_lot::RwLock`. Snapshots are
//! copies; holding one never blocks a writer.
//!
//! ## Outage Simulation
//!
//! `{service: "all", state: "down"}` takes the process offline: `api` and
//! `proofLedger` go down and `localAgent` is degraded (it still validates,
//! but cannot register). Any other known state for `all` restores
//! everything. A single named dependency only changes that dependency's
//! status; the mode is left alone. Unknown services and states are rejected
//! for `all` as well.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use gv_core::Timestamp;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, ServiceError};

const ENCLAVE_NOTE: &str = "Secure enclave active";

/// Process connectivity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Online,
    Offline,
}

/// Status of one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Ok,
    Degraded,
    Down,
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyStatus {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "degraded" => Ok(Self::Degraded),
            "down" => Ok(Self::Down),
            other => Err(HealthError::UnknownStatus(other.to_string())),
        }
    }
}

/// A monitored dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dependency {
    Api,
    LocalAgent,
    ProofLedger,
    Enclave,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [
        Dependency::Api,
        Dependency::LocalAgent,
        Dependency::ProofLedger,
        Dependency::Enclave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::LocalAgent => "localAgent",
            Self::ProofLedger => "proofLedger",
            Self::Enclave => "enclave",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dependency {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| HealthError::UnknownService(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    pub status: DependencyStatus,
    /// `None` while the API is unreachable.
    pub latency_ms: Option<u64>,
    pub last_checked: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAgentHealth {
    pub status: DependencyStatus,
    pub last_run: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerHealth {
    pub status: DependencyStatus,
    /// Local proofs minted since the ledger was last reachable.
    pub lag: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclaveHealth {
    pub status: DependencyStatus,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Services {
    pub api: ApiHealth,
    pub local_agent: LocalAgentHealth,
    pub proof_ledger: LedgerHealth,
    pub enclave: EnclaveHealth,
}

impl Services {
    fn status(&self, dep: Dependency) -> DependencyStatus {
        match dep {
            Dependency::Api => self.api.status,
            Dependency::LocalAgent => self.local_agent.status,
            Dependency::ProofLedger => self.proof_ledger.status,
            Dependency::Enclave => self.enclave.status,
        }
    }

    fn set_status(&mut self, dep: Dependency, status: DependencyStatus) {
        match dep {
            Dependency::Api => {
                self.api.status = status;
                if status == DependencyStatus::Down {
                    self.api.latency_ms = None;
                }
            }
            Dependency::LocalAgent => self.local_agent.status = status,
            Dependency::ProofLedger => self.proof_ledger.status = status,
            Dependency::Enclave => self.enclave.status = status,
        }
    }
}

/// Point-in-time health snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub mode: Mode,
    pub services: Services,
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    pub fn is_online(&self) -> bool {
        self.mode == Mode::Online
    }
}

/// Body of an outage simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutageRequest {
    /// `all` or a dependency name.
    pub service: String,
    /// `ok`, `degraded` or `down`.
    pub state: String,
}

impl OutageRequest {
    pub fn new(service: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            state: state.into(),
        }
    }
}

#[derive(Debug)]
struct State {
    mode: Mode,
    services: Services,
}

impl State {
    fn online() -> Self {
        let now = Timestamp::now();
        Self {
            mode: Mode::Online,
            services: Services {
                api: ApiHealth {
                    status: DependencyStatus::Ok,
                    latency_ms: None,
                    last_checked: None,
                },
                local_agent: LocalAgentHealth {
                    status: DependencyStatus::Ok,
                    last_run: now,
                },
                proof_ledger: LedgerHealth {
                    status: DependencyStatus::Ok,
                    lag: 0,
                },
                enclave: EnclaveHealth {
                    status: DependencyStatus::Ok,
                    note: ENCLAVE_NOTE.to_string(),
                },
            },
        }
    }

    fn set_all(&mut self, down: bool) {
        let (mode, reachable, agent) = if down {
            (Mode::Offline, DependencyStatus::Down, DependencyStatus::Degraded)
        } else {
            (Mode::Online, DependencyStatus::Ok, DependencyStatus::Ok)
        };
        self.mode = mode;
        self.services.set_status(Dependency::Api, reachable);
        self.services.set_status(Dependency::ProofLedger, reachable);
        self.services.set_status(Dependency::LocalAgent, agent);
        if !down {
            self.services.proof_ledger.lag = 0;
        }
    }
}

/// Shared, cloneable health monitor.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    state: Arc<RwLock<State>>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMonitor {
    /// A monitor in online mode with every dependency ok.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::online())),
        }
    }

    /// A monitor that starts as if `{all, down}` had been applied.
    pub fn offline() -> Self {
        let monitor = Self::new();
        monitor.state.write().set_all(true);
        monitor
    }

    /// Copy of the current state, stamped with the current time.
    pub fn snapshot(&self) -> ServiceHealth {
        let state = self.state.read();
        ServiceHealth {
            mode: state.mode,
            services: state.services.clone(),
            checked_at: Timestamp::now(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.read().mode
    }

    pub fn is_online(&self) -> bool {
        self.mode() == Mode::Online
    }

    pub fn status(&self, dep: Dependency) -> DependencyStatus {
        self.state.read().services.status(dep)
    }

    /// Refuse `operation` while offline.
    pub fn ensure_online(&self, operation: &'static str) -> Result<(), ServiceError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(ServiceError::unavailable(operation, "service is offline"))
        }
    }

    /// Refuse `operation` while offline or while the proof ledger is not `ok`.
    pub fn ensure_ledger(&self, operation: &'static str) -> Result<(), ServiceError> {
        let state = self.state.read();
        if state.mode == Mode::Offline {
            return Err(ServiceError::unavailable(operation, "service is offline"));
        }
        match state.services.proof_ledger.status {
            DependencyStatus::Ok => Ok(()),
            DependencyStatus::Degraded => {
                Err(ServiceError::unavailable(operation, "proof ledger is degraded"))
            }
            DependencyStatus::Down => Err(ServiceError::unavailable(operation, "proof ledger is down")),
        }
    }

    /// Apply an outage request and return the resulting snapshot.
    ///
    /// An unknown service or status changes nothing.
    pub fn simulate_outage(&self, request: &OutageRequest) -> Result<ServiceHealth, HealthError> {
        let status: DependencyStatus = request.state.parse()?;
        if request.service == "all" {
            let down = status == DependencyStatus::Down;
            self.state.write().set_all(down);
            tracing::warn!(offline = down, "simulated outage applied to all services");
        } else {
            let dep: Dependency = request.service.parse()?;
            self.set_status(dep, status);
        }
        Ok(self.snapshot())
    }

    /// Set one dependency's status. The mode is unchanged.
    pub fn set_status(&self, dep: Dependency, status: DependencyStatus) {
        self.state.write().services.set_status(dep, status);
        tracing::info!(service = %dep, status = %status, "dependency status changed");
    }

    /// Back to online with every dependency ok.
    pub fn restore(&self) {
        let mut state = self.state.write();
        state.set_all(false);
        state.services.enclave.status = DependencyStatus::Ok;
    }

    /// Record an API round trip. Ignored while the API is down.
    pub fn record_api_latency(&self, latency_ms: u64) {
        let mut state = self.state.write();
        let api = &mut state.services.api;
        api.last_checked = Some(Timestamp::now());
        if api.status != DependencyStatus::Down {
            api.latency_ms = Some(latency_ms);
        }
    }

    /// Record a completed local validation run.
    pub fn record_local_run(&self) {
        self.state.write().services.local_agent.last_run = Timestamp::now();
    }

    /// Record a proof minted without the ledger.
    pub fn record_unregistered_proof(&self) {
        let mut state = self.state.write();
        state.services.proof_ledger.lag = state.services.proof_ledger.lag.saturating_add(1);
    }
}
