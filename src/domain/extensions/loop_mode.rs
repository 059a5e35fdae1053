use crate::domain::cluster::{AgentPoolProfile, Extension};

/// Opt-in granularity declared by a pool's extension reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionMode {
    /// Apply to exactly one instance.
    Single,
    /// Apply to every instance.
    All,
}

impl ExtensionMode {
    pub fn from_opt_in(extension: &Extension) -> Self {
        if extension.single_or_all.eq_ignore_ascii_case("single") {
            ExtensionMode::Single
        } else {
            ExtensionMode::All
        }
    }
}

/// Pool an extension deployment targets.
#[derive(Debug, Clone, Copy)]
pub enum ExtensionTarget<'a> {
    Master,
    Agent(&'a AgentPoolProfile),
}

impl ExtensionTarget<'_> {
    pub fn vm_type(&self) -> &'static str {
        match self {
            ExtensionTarget::Master => "master",
            ExtensionTarget::Agent(_) => "agent",
        }
    }

    pub fn vm_name_prefix(&self) -> String {
        match self {
            ExtensionTarget::Master => "variables('masterVMNamePrefix')".to_string(),
            ExtensionTarget::Agent(pool) => format!("variables('{}VMNamePrefix')", pool.name),
        }
    }

    fn variable_prefix(&self) -> &str {
        match self {
            ExtensionTarget::Master => "master",
            ExtensionTarget::Agent(pool) => &pool.name,
        }
    }

    /// Masters and availability-set pools keep existing instances across
    /// deployments, so they loop from an offset.
    fn keeps_existing_instances(&self) -> bool {
        match self {
            ExtensionTarget::Master => true,
            ExtensionTarget::Agent(pool) => pool.is_availability_sets(),
        }
    }
}

/// How many instances an extension deployment loops over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Every instance of a pool that is recreated on each deployment.
    FirstDeploy,
    /// Instances above the pool's offset, so already-extended VMs are skipped.
    ScaleUp,
    /// Exactly one instance.
    SingleTarget,
}

impl LoopMode {
    pub fn for_target(target: &ExtensionTarget<'_>, mode: ExtensionMode) -> Self {
        match mode {
            ExtensionMode::Single => LoopMode::SingleTarget,
            ExtensionMode::All if target.keeps_existing_instances() => LoopMode::ScaleUp,
            ExtensionMode::All => LoopMode::FirstDeploy,
        }
    }
}

/// Loop count substituted into a linked template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCount {
    /// Statically known count, rendered as a bare integer.
    Literal(u32),
    /// Template expression evaluated at deployment time.
    Expression(String),
}

/// Loop count and offset for one (target, mode) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopPlan {
    pub count: LoopCount,
    pub offset: String,
}

impl LoopPlan {
    pub fn new(target: &ExtensionTarget<'_>, mode: ExtensionMode) -> Self {
        let prefix = target.variable_prefix();
        let offset = if target.keeps_existing_instances() {
            format!("variables('{}Offset')", prefix)
        } else {
            String::new()
        };

        let count = match LoopMode::for_target(target, mode) {
            LoopMode::SingleTarget => LoopCount::Literal(1),
            LoopMode::ScaleUp => LoopCount::Expression(format!(
                "[sub(variables('{prefix}Count'), variables('{prefix}Offset'))]"
            )),
            LoopMode::FirstDeploy => LoopCount::Expression(format!("[variables('{prefix}Count')]")),
        };

        Self { count, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cluster::AvailabilityProfile;

    fn opt_in(mode: &str) -> Extension {
        Extension { name: "hello".into(), single_or_all: mode.into() }
    }

    fn pool(availability: AvailabilityProfile) -> AgentPoolProfile {
        AgentPoolProfile {
            name: "agent1".into(),
            count: 3,
            availability_profile: availability,
            ..Default::default()
        }
    }

    #[test]
    fn mode_parsing_is_case_insensitive() {
        assert_eq!(ExtensionMode::from_opt_in(&opt_in("Single")), ExtensionMode::Single);
        assert_eq!(ExtensionMode::from_opt_in(&opt_in("all")), ExtensionMode::All);
        assert_eq!(ExtensionMode::from_opt_in(&opt_in("")), ExtensionMode::All);
    }

    #[test]
    fn master_all_scales_up_from_offset() {
        let plan = LoopPlan::new(&ExtensionTarget::Master, ExtensionMode::All);
        assert_eq!(
            plan.count,
            LoopCount::Expression("[sub(variables('masterCount'), variables('masterOffset'))]".into())
        );
        assert_eq!(plan.offset, "variables('masterOffset')");
    }

    #[test]
    fn scale_set_pool_deploys_every_instance_without_offset() {
        let profile = pool(AvailabilityProfile::VirtualMachineScaleSets);
        let target = ExtensionTarget::Agent(&profile);
        assert_eq!(LoopMode::for_target(&target, ExtensionMode::All), LoopMode::FirstDeploy);
        let plan = LoopPlan::new(&target, ExtensionMode::All);
        assert_eq!(plan.count, LoopCount::Expression("[variables('agent1Count')]".into()));
        assert_eq!(plan.offset, "");
    }

    #[test]
    fn availability_set_pool_skips_existing_instances() {
        let profile = pool(AvailabilityProfile::AvailabilitySet);
        let plan = LoopPlan::new(&ExtensionTarget::Agent(&profile), ExtensionMode::All);
        assert_eq!(
            plan.count,
            LoopCount::Expression("[sub(variables('agent1Count'), variables('agent1Offset'))]".into())
        );
        assert_eq!(plan.offset, "variables('agent1Offset')");
    }

    #[test]
    fn single_mode_uses_literal_count_and_keeps_offset() {
        let profile = pool(AvailabilityProfile::AvailabilitySet);
        let plan = LoopPlan::new(&ExtensionTarget::Agent(&profile), ExtensionMode::Single);
        assert_eq!(plan.count, LoopCount::Literal(1));
        assert_eq!(plan.offset, "variables('agent1Offset')");
    }
}
