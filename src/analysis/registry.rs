//! Issue registries, one per rule family

use serde::Serialize;

use super::detectors::anvil::{
    AnvilJavaUsageDetector, ContributesBindingSuperDetector, MissingContributesBindingDetector,
    MissingContributesToDetector,
};
use super::detectors::dagger::{
    BindsMethodDetector, ComponentAbstractDetector, ComponentMethodDetector,
    FieldInjectionDetector, MissingModuleDetector, MultipleScopesDetector, ProvidesBodyDetector,
    ScopedWithoutInjectDetector, StaticProvidesDetector,
};
use super::detectors::hilt::{
    AndroidEntryPointDetector, EntryPointInterfaceDetector, HiltAndroidAppDetector,
    HiltViewModelDetector, InstallInDetector,
};
use super::detectors::Detector;
use super::{Family, Issue, IssueDefinition};
use crate::config::Config;

/// Rule API version the registries are written against
pub const CURRENT_API: u32 = 14;
/// Oldest API version the registries still run on
pub const MIN_API: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Vendor {
    pub name: &'static str,
    pub identifier: &'static str,
    pub version: &'static str,
}

const VENDOR: Vendor = Vendor {
    name: "injectlint",
    identifier: "injectlint",
    version: env!("CARGO_PKG_VERSION"),
};

pub trait IssueRegistry: Send + Sync {
    fn family(&self) -> Family;

    fn detectors(&self, config: &Config) -> Vec<Box<dyn Detector>>;

    fn issues(&self) -> Vec<IssueDefinition> {
        Issue::ALL
            .iter()
            .filter(|i| i.family() == self.family())
            .map(|i| i.definition())
            .collect()
    }

    fn vendor(&self) -> Vendor {
        VENDOR
    }

    fn api(&self) -> u32 {
        CURRENT_API
    }

    fn min_api(&self) -> u32 {
        MIN_API
    }
}

pub struct DaggerIssueRegistry;

impl IssueRegistry for DaggerIssueRegistry {
    fn family(&self) -> Family {
        Family::Dagger
    }

    fn detectors(&self, config: &Config) -> Vec<Box<dyn Detector>> {
        vec![
            Box::new(BindsMethodDetector::new()),
            Box::new(MissingModuleDetector::new()),
            Box::new(MultipleScopesDetector::new()),
            Box::new(StaticProvidesDetector::new()),
            Box::new(ComponentAbstractDetector::new()),
            Box::new(ComponentMethodDetector::new()),
            Box::new(ScopedWithoutInjectDetector::new()),
            Box::new(FieldInjectionDetector::from_config(config)),
            Box::new(ProvidesBodyDetector::new()),
        ]
    }
}

pub struct AnvilIssueRegistry;

impl IssueRegistry for AnvilIssueRegistry {
    fn family(&self) -> Family {
        Family::Anvil
    }

    fn detectors(&self, config: &Config) -> Vec<Box<dyn Detector>> {
        vec![
            Box::new(AnvilJavaUsageDetector::new()),
            Box::new(ContributesBindingSuperDetector::new()),
            Box::new(MissingContributesBindingDetector::from_config(config)),
            Box::new(MissingContributesToDetector::from_config(config)),
        ]
    }
}

pub struct HiltIssueRegistry;

impl IssueRegistry for HiltIssueRegistry {
    fn family(&self) -> Family {
        Family::Hilt
    }

    fn detectors(&self, config: &Config) -> Vec<Box<dyn Detector>> {
        vec![
            Box::new(AndroidEntryPointDetector::from_config(config)),
            Box::new(HiltAndroidAppDetector::new()),
            Box::new(HiltViewModelDetector::new()),
            Box::new(EntryPointInterfaceDetector::new()),
            Box::new(InstallInDetector::new()),
        ]
    }
}

pub fn all_registries() -> Vec<Box<dyn IssueRegistry>> {
    vec![
        Box::new(DaggerIssueRegistry),
        Box::new(AnvilIssueRegistry),
        Box::new(HiltIssueRegistry),
    ]
}

/// Detectors of every registry whose family is enabled
pub fn detectors_for(config: &Config) -> Vec<Box<dyn Detector>> {
    all_registries()
        .iter()
        .filter(|r| config.family_enabled(r.family()))
        .flat_map(|r| r.detectors(config))
        .collect()
}
