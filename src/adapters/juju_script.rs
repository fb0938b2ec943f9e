//! Juju command rendering.
//!
//! Turns a deployment plan into the `juju` command lines a controller runs. Nothing here
//! executes a process; callers print or hand the commands on.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::domain::stack::PATH_SEPARATOR;
use crate::domain::{DeploymentPlan, InstanceName, LeafUnit, ResolvedRelation};

/// Separator standing in for `.` inside Juju application names.
///
/// Wraps the reserved `s` part that no component or instance name may contain, so
/// distinct leaves never share an application name.
pub const STACK_SEPARATOR: &str = "-s-";

/// One command line, program first.
pub type Command = Vec<String>;

/// Renders deploy and teardown command sequences for a stack instance.
pub struct JujuScript;

impl JujuScript {
    /// Application name of a leaf unit inside an instance.
    ///
    /// `prod` + `site.wp.mysql` becomes `prod-s-site-s-wp-s-mysql`.
    pub fn application_name(instance: &InstanceName, unit: &str) -> String {
        let mut name = instance.to_string();
        for segment in unit.split(PATH_SEPARATOR) {
            name.push_str(STACK_SEPARATOR);
            name.push_str(segment);
        }
        name
    }

    /// Deploy sequence: every leaf, then every relation.
    pub fn render(instance: &InstanceName, plan: &DeploymentPlan) -> Vec<Command> {
        let mut commands: Vec<Command> =
            plan.units.iter().map(|unit| deploy_command(instance, unit)).collect();

        let mut offered = BTreeSet::new();
        let mut consumed = BTreeSet::new();
        for relation in &plan.relations {
            let Some(link) = Link::new(instance, plan, relation) else {
                continue;
            };

            if !relation.cross_model {
                commands.push(cmd([
                    "relate",
                    &link.provider_endpoint(),
                    &link.requirer_endpoint(),
                    "-m",
                    &link.requirer_model,
                ]));
                continue;
            }

            let offer = link.offer_name();
            if offered.insert(offer.clone()) {
                commands.push(cmd([
                    "offer",
                    &format!("{}.{}", link.provider_model, link.provider_endpoint()),
                    &offer,
                ]));
            }
            if consumed.insert((offer.clone(), link.requirer_model.clone())) {
                commands.push(cmd([
                    "consume",
                    &format!("{}.{}", link.provider_model, offer),
                    "-m",
                    &link.requirer_model,
                ]));
            }
            commands.push(cmd([
                "relate",
                &offer,
                &link.requirer_endpoint(),
                "-m",
                &link.requirer_model,
            ]));
        }

        commands
    }

    /// Teardown sequence: consumed offers, offers, then applications in reverse leaf order.
    pub fn teardown(instance: &InstanceName, plan: &DeploymentPlan) -> Vec<Command> {
        let mut saas = BTreeSet::new();
        let mut offers = BTreeSet::new();
        for relation in plan.relations.iter().filter(|r| r.cross_model) {
            if let Some(link) = Link::new(instance, plan, relation) {
                let offer = link.offer_name();
                saas.insert((offer.clone(), link.requirer_model.clone()));
                offers.insert(format!("{}.{}", link.provider_model, offer));
            }
        }

        let mut commands: Vec<Command> = saas
            .into_iter()
            .map(|(name, model)| cmd(["remove-saas", &name, "-m", &model]))
            .collect();
        commands.extend(offers.into_iter().map(|uri| cmd(["remove-offer", &uri, "-y"])));
        commands.extend(plan.units.iter().rev().map(|unit| {
            cmd([
                "remove-application",
                &Self::application_name(instance, &unit.name),
                "-m",
                &unit.model,
            ])
        }));
        commands
    }

    /// Join a command into a single shell line, quoting arguments that need it.
    pub fn format_command(command: &[String]) -> String {
        command.iter().map(|arg| shell_quote(arg)).collect::<Vec<_>>().join(" ")
    }
}

/// A relation with both leaves looked up in the plan.
struct Link<'a> {
    provider_app: String,
    provider_endpoint: &'a str,
    provider_model: String,
    requirer_app: String,
    requirer_endpoint: &'a str,
    requirer_model: String,
}

impl<'a> Link<'a> {
    fn new(
        instance: &InstanceName,
        plan: &DeploymentPlan,
        relation: &'a ResolvedRelation,
    ) -> Option<Self> {
        let provider = plan.unit(&relation.provider.unit)?;
        let requirer = plan.unit(&relation.requirer.unit)?;
        Some(Self {
            provider_app: JujuScript::application_name(instance, &provider.name),
            provider_endpoint: &relation.provider.endpoint,
            provider_model: provider.model.clone(),
            requirer_app: JujuScript::application_name(instance, &requirer.name),
            requirer_endpoint: &relation.requirer.endpoint,
            requirer_model: requirer.model.clone(),
        })
    }

    fn provider_endpoint(&self) -> String {
        format!("{}:{}", self.provider_app, self.provider_endpoint)
    }

    fn requirer_endpoint(&self) -> String {
        format!("{}:{}", self.requirer_app, self.requirer_endpoint)
    }

    fn offer_name(&self) -> String {
        format!("{}{}{}", self.provider_app, STACK_SEPARATOR, self.provider_endpoint)
    }
}

fn deploy_command(instance: &InstanceName, unit: &LeafUnit) -> Command {
    let app = JujuScript::application_name(instance, &unit.name);
    let units = unit.units.to_string();
    let mut command = cmd(["deploy", &unit.charm, &app, "-n", &units, "-m", &unit.model]);
    if let Some(channel) = &unit.channel {
        command.extend(["--channel".to_string(), channel.clone()]);
    }
    if unit.trust {
        command.push("--trust".to_string());
    }
    for (key, value) in &unit.config {
        command.push("--config".to_string());
        command.push(format!("{}={}", key, scalar_text(value)));
    }
    command
}

fn cmd<const N: usize>(args: [&str; N]) -> Command {
    std::iter::once("juju").chain(args).map(str::to_string).collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => {
            serde_yaml::to_string(other).map(|s| s.trim_end().to_string()).unwrap_or_default()
        }
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| c.is_ascii_alphanumeric() || "-_.:/=,@+%".contains(c));
    if plain { arg.to_string() } else { format!("'{}'", arg.replace('\'', "'\\''")) }
}
