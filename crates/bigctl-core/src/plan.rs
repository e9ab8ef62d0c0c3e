// ── Migration plan ──
//
// The ordered table of pools and member addresses a run walks through.
// Order is significant: members are processed exactly as listed.

use serde::{Deserialize, Serialize};

/// One pool and the members to add to / remove from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPlan {
    /// Pool name inside the target partition.
    pub name: String,
    /// Service port shared by every member of this entry.
    pub port: String,
    /// Member addresses (IP or hostname), in processing order.
    #[serde(default)]
    pub members: Vec<String>,
}

impl PoolPlan {
    pub fn new(
        name: impl Into<String>,
        port: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            port: port.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MigrationPlan {
    pools: Vec<PoolPlan>,
}

impl MigrationPlan {
    pub fn new(pools: Vec<PoolPlan>) -> Self {
        Self { pools }
    }

    /// The rollback table the tool ships with: the mobility web-service
    /// servers behind `pool_ws_mobilidadews_renner_25796`.
    pub fn builtin() -> Self {
        Self::new(vec![PoolPlan::new(
            "pool_ws_mobilidadews_renner_25796",
            "25796",
            [
                "10.51.136.134",
                "10.51.136.135",
                "10.51.136.136",
                "10.51.136.137",
                "10.51.136.140",
                "10.51.136.141",
                "10.51.136.142",
                "10.51.136.143",
                "10.51.136.144",
                "10.51.136.145",
                "10.51.136.146",
                "10.51.136.147",
            ],
        )])
    }

    pub fn pools(&self) -> &[PoolPlan] {
        &self.pools
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }

    /// Total members across all pools.
    pub fn member_count(&self) -> usize {
        self.pools.iter().map(|p| p.members.len()).sum()
    }

    /// Every `(pool, member)` pair in processing order.
    pub fn members(&self) -> impl Iterator<Item = (&PoolPlan, &str)> {
        self.pools
            .iter()
            .flat_map(|pool| pool.members.iter().map(move |m| (pool, m.as_str())))
    }
}

impl From<Vec<PoolPlan>> for MigrationPlan {
    fn from(pools: Vec<PoolPlan>) -> Self {
        Self::new(pools)
    }
}
