// src/resolver/scenario.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of test scenarios the resolver supplies version values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Newer plugin of the adjacent pair sharing a protocol version.
    SoloPluginA,
    /// Older plugin of that pair.
    SoloPluginB,
    /// Host release the solo pair runs against.
    SoloHost,
    /// Newest host of the highest protocol group with two or more hosts.
    MultiHost1,
    /// Second-newest host of that group.
    MultiHost2,
    /// Newest selectable plugin speaking that group's protocol.
    MultiHostPlugin,
    /// Host release for single-host runs; always the "latest" sentinel.
    OnlyHost,
    /// Newest selectable plugin whose successor speaks another protocol.
    LatestPluginToHost,
    /// Host release paired with `LatestPluginToHost`.
    LatestHostToPlugin,
}

impl Scenario {
    pub const ALL: [Scenario; 9] = [
        Scenario::SoloPluginA,
        Scenario::SoloPluginB,
        Scenario::SoloHost,
        Scenario::MultiHost1,
        Scenario::MultiHost2,
        Scenario::MultiHostPlugin,
        Scenario::OnlyHost,
        Scenario::LatestPluginToHost,
        Scenario::LatestHostToPlugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::SoloPluginA => "SoloPluginA",
            Scenario::SoloPluginB => "SoloPluginB",
            Scenario::SoloHost => "SoloHost",
            Scenario::MultiHost1 => "MultiHost1",
            Scenario::MultiHost2 => "MultiHost2",
            Scenario::MultiHostPlugin => "MultiHostPlugin",
            Scenario::OnlyHost => "OnlyHost",
            Scenario::LatestPluginToHost => "LatestPluginToHost",
            Scenario::LatestHostToPlugin => "LatestHostToPlugin",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scenario-to-version assignments. Built once by the resolver; writes are
/// crate-internal so the map is immutable once handed to consumers.
/// Scenarios the resolution left unset read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioMap {
    values: HashMap<Scenario, String>,
}

impl ScenarioMap {
    pub(crate) fn set(&mut self, scenario: Scenario, version: impl Into<String>) {
        self.values.insert(scenario, version.into());
    }

    pub fn get(&self, scenario: Scenario) -> &str {
        self.values
            .get(&scenario)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_set(&self, scenario: Scenario) -> bool {
        self.values.contains_key(&scenario)
    }

    /// All scenarios in declaration order, unset ones as empty strings.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &str)> {
        Scenario::ALL.iter().map(move |s| (*s, self.get(*s)))
    }
}
