use crate::finding::{AnnotationError, ValidationReport};
use crate::rules;
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::{BTreeSet, HashMap};

pub fn format(report: &ValidationReport) -> String {
    let errors: Vec<&AnnotationError> = report.errors().collect();

    let rule_ids: Vec<&str> = errors
        .iter()
        .map(|e| e.rule_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rule_index: HashMap<&str, i64> = rule_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i as i64))
        .collect();

    let descriptors: Vec<ReportingDescriptor> = rule_ids
        .iter()
        .map(|id| {
            let mut rule = ReportingDescriptor::builder().id(id.to_string()).build();
            if let Some(info) = rules::find_rule(id) {
                rule.short_description = Some(
                    MultiformatMessageString::builder()
                        .text(info.message.to_string())
                        .build(),
                );
                rule.help = Some(
                    MultiformatMessageString::builder()
                        .text(info.remediation.to_string())
                        .build(),
                );
            }
            rule
        })
        .collect();

    let results: Vec<SarifResult> = errors
        .iter()
        .map(|e| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(e.message.clone()).build())
                .build();

            result.rule_id = Some(e.rule_id.to_string());
            result.level = Some(ResultLevel::Error);
            result.rule_index = rule_index.get(e.rule_id).copied();

            let uri = e.file.to_string_lossy().replace('\\', "/");
            let mut physical = PhysicalLocation::builder().build();
            physical.artifact_location = Some(ArtifactLocation::builder().uri(uri).build());
            physical.region = Some(Region::builder().start_line(e.line as i64).build());

            let mut location = Location::builder().build();
            location.physical_location = Some(physical);
            result.locations = Some(vec![location]);

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("oxidized-provenance")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(descriptors)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    let mut json = serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed");
    json.push('\n');
    json
}
