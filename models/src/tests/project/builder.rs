use crate::{ModelError, ProjectIdentifierBuilder};

fn valid_builder() -> ProjectIdentifierBuilder {
    ProjectIdentifierBuilder::default()
        .with_owner("acme")
        .with_repository("infra")
        .with_project("website")
}

#[test]
fn given_all_fields_when_build_called_then_succeeds() {
    let project = valid_builder().build().unwrap();

    assert_eq!(project.owner, "acme");
    assert_eq!(project.repository, "infra");
    assert_eq!(project.project, "website");
    assert_eq!(project.path(), "acme/infra/website");
}

#[test]
fn given_suffix_with_leading_slash_when_joined_then_single_separator() {
    let project = valid_builder().build().unwrap();

    assert_eq!(project.join("/stacks"), "acme/infra/website/stacks");
    assert_eq!(project.join("stacks/dev"), "acme/infra/website/stacks/dev");
    assert_eq!(project.join(""), "acme/infra/website");
}

/// **VALUE**: Verifies missing components are rejected with the field name.
///
/// **WHY THIS MATTERS**: Identifiers become URL path segments; a missing owner would
/// produce `//infra/website` and hit the wrong API route.
///
/// **BUG THIS CATCHES**: Would catch if the builder silently defaulted to empty strings.
#[test]
fn given_missing_owner_when_build_called_then_validation_error() {
    let result = ProjectIdentifierBuilder::default()
        .with_repository("infra")
        .with_project("website")
        .build();

    let Err(ModelError::Validation { message, .. }) = result else {
        panic!("Expected validation error");
    };
    assert!(message.contains("Owner"));
}

#[test]
fn given_blank_project_when_build_called_then_validation_error() {
    let result = valid_builder().with_project("  ").build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_slash_in_repository_when_build_called_then_validation_error() {
    let result = valid_builder().with_repository("infra/nested").build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("cannot contain '/'"));
}
