//! Extension opt-in detection and linked-template token substitution.

mod catalog;
mod loop_mode;
pub mod script_commands;

use crate::domain::cluster::{Extension, ExtensionProfile};

pub use catalog::ExtensionCatalog;
pub use loop_mode::{ExtensionMode, ExtensionTarget, LoopCount, LoopMode, LoopPlan};

/// Descriptor listing the orchestrator types an extension supports.
pub const SUPPORTED_ORCHESTRATORS_FILE: &str = "supported-orchestrators.json";
/// Deployment resource fragment published by an extension.
pub const TEMPLATE_LINK_FILE: &str = "template-link.json";

const TARGET_VM_TYPE_TOKEN: &str = "EXTENSION_TARGET_VM_TYPE";
const PARAMETERS_TOKEN: &str = "EXTENSION_PARAMETERS_REPLACE";
const URL_TOKEN: &str = "EXTENSION_URL_REPLACE";
const TARGET_VM_NAME_PREFIX_TOKEN: &str = "EXTENSION_TARGET_VM_NAME_PREFIX";
const LOOP_COUNT_TOKEN: &str = "EXTENSION_LOOP_COUNT";
const QUOTED_LOOP_COUNT_TOKEN: &str = "\"EXTENSION_LOOP_COUNT\"";
const LOOP_OFFSET_TOKEN: &str = "EXTENSION_LOOP_OFFSET";

/// Mode of the profile's opt-in for `extension_name`, if it opted in.
pub fn opted_in_mode(extension_name: &str, opt_ins: &[Extension]) -> Option<ExtensionMode> {
    opt_ins.iter().find(|e| e.name == extension_name).map(ExtensionMode::from_opt_in)
}

/// Substitute target and loop parameters into a fetched `template-link.json`.
///
/// A literal loop count replaces the quoted token so the result holds a bare
/// integer; an expression count replaces the token inside its quotes.
pub fn splice_linked_template(
    template: &str,
    profile: &ExtensionProfile,
    target: &ExtensionTarget<'_>,
    plan: &LoopPlan,
) -> String {
    let parameters_reference = format!("[parameters('{}')]", profile.parameters_name());
    let text = template
        .replace(TARGET_VM_TYPE_TOKEN, target.vm_type())
        .replace(PARAMETERS_TOKEN, &parameters_reference)
        .replace(URL_TOKEN, &profile.root_url)
        .replace(TARGET_VM_NAME_PREFIX_TOKEN, &target.vm_name_prefix());

    let text = match &plan.count {
        LoopCount::Literal(count) => text.replace(QUOTED_LOOP_COUNT_TOKEN, &count.to_string()),
        LoopCount::Expression(expr) => text.replace(LOOP_COUNT_TOKEN, expr),
    };

    text.replace(LOOP_OFFSET_TOKEN, &plan.offset)
}
