//! CloudWatch Observability Admin
//!
//! restJson1 protocol, PascalCase wire members, `NextToken` pagination.
//! Organization-wide variants take the same parameters as their account
//! counterparts, plus account and organizational unit filters on lists.

use awsops_core::{
    FieldKind, OperationDescriptor, OutputField, Pagination, ParamSpec, Protocol,
    ServiceDescriptor,
};

pub static SERVICE: ServiceDescriptor = ServiceDescriptor {
    name: "observabilityadmin",
    title: "CloudWatch Observability Admin",
    signing_name: "observabilityadmin",
    endpoint_prefix: "observabilityadmin",
    protocol: Protocol::RestJson1,
};

const RESOURCE_TYPES: &[&str] = &["AWS::EC2::Instance", "AWS::EC2::VPC", "AWS::Lambda::Function"];
const TELEMETRY_TYPES: &[&str] = &["Logs", "Metrics", "Traces"];
const DESTINATION_TYPES: &[&str] = &["cloud-watch-logs"];
const TRAFFIC_TYPES: &[&str] = &["ACCEPT", "REJECT", "ALL"];

const PAGINATION: Option<Pagination> = Some(Pagination {
    token_param: "NextToken",
    output_token: "NextToken",
});

const NEXT_TOKEN_OUT: OutputField = OutputField::new("NextToken", "NextToken", FieldKind::String);
const RULE_ARN_OUT: OutputField = OutputField::new("RuleArn", "RuleArn", FieldKind::String);

const RULE_OUTPUTS: &[OutputField] = &[
    OutputField::new("RuleName", "RuleName", FieldKind::String),
    RULE_ARN_OUT,
    OutputField::new("CreatedTimeStamp", "CreatedTimeStamp", FieldKind::Integer),
    OutputField::new("LastUpdateTimeStamp", "LastUpdateTimeStamp", FieldKind::Integer),
    OutputField::new("TelemetryRule", "TelemetryRule", FieldKind::Structure),
];

const EVALUATION_STATUS_OUTPUTS: &[OutputField] = &[
    OutputField::new("Status", "Status", FieldKind::String),
    OutputField::new("FailureReason", "FailureReason", FieldKind::String),
];

/// The `Rule` structure flattened into parameters, followed by the
/// operation's own parameters.
macro_rules! with_rule_params {
    ($($param:expr),* $(,)?) => {
        &[
            $($param,)*
            ParamSpec::enumeration("Rule_ResourceType", "Rule.ResourceType", RESOURCE_TYPES)
                .required()
                .aliases(&["ResourceType"]),
            ParamSpec::enumeration("Rule_TelemetryType", "Rule.TelemetryType", TELEMETRY_TYPES)
                .required()
                .aliases(&["TelemetryType"]),
            ParamSpec::string("Rule_Scope", "Rule.Scope").aliases(&["Scope"]),
            ParamSpec::string("Rule_SelectionCriteria", "Rule.SelectionCriteria")
                .aliases(&["SelectionCriteria"]),
            ParamSpec::enumeration(
                "DestinationConfiguration_DestinationType",
                "Rule.DestinationConfiguration.DestinationType",
                DESTINATION_TYPES,
            )
            .aliases(&["DestinationType"]),
            ParamSpec::string(
                "DestinationConfiguration_DestinationPattern",
                "Rule.DestinationConfiguration.DestinationPattern",
            )
            .aliases(&["DestinationPattern"]),
            ParamSpec::integer(
                "DestinationConfiguration_RetentionInDay",
                "Rule.DestinationConfiguration.RetentionInDays",
            )
            .aliases(&["RetentionInDays"]),
            ParamSpec::string(
                "VPCFlowLogParameters_LogFormat",
                "Rule.DestinationConfiguration.VPCFlowLogParameters.LogFormat",
            )
            .aliases(&["LogFormat"]),
            ParamSpec::integer(
                "VPCFlowLogParameters_MaxAggregationInterval",
                "Rule.DestinationConfiguration.VPCFlowLogParameters.MaxAggregationInterval",
            )
            .aliases(&["MaxAggregationInterval"]),
            ParamSpec::enumeration(
                "VPCFlowLogParameters_TrafficType",
                "Rule.DestinationConfiguration.VPCFlowLogParameters.TrafficType",
                TRAFFIC_TYPES,
            )
            .aliases(&["TrafficType"]),
        ]
    };
}

pub static CREATE_TELEMETRY_RULE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "CreateTelemetryRule",
    default_selector: "RuleArn",
    pagination: None,
    params: with_rule_params![
        ParamSpec::string("RuleName", "RuleName").required(),
        ParamSpec::map("Tag", "Tags").aliases(&["Tags"]),
    ],
    outputs: &[RULE_ARN_OUT],
};

pub static CREATE_TELEMETRY_RULE_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "CreateTelemetryRuleForOrganization",
    default_selector: "RuleArn",
    pagination: None,
    params: with_rule_params![
        ParamSpec::string("RuleName", "RuleName").required(),
        ParamSpec::map("Tag", "Tags").aliases(&["Tags"]),
    ],
    outputs: &[RULE_ARN_OUT],
};

pub static DELETE_TELEMETRY_RULE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "DeleteTelemetryRule",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: &[],
};

pub static DELETE_TELEMETRY_RULE_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "DeleteTelemetryRuleForOrganization",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: &[],
};

pub static GET_TELEMETRY_EVALUATION_STATUS: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetTelemetryEvaluationStatus",
    default_selector: "*",
    pagination: None,
    params: &[],
    outputs: EVALUATION_STATUS_OUTPUTS,
};

pub static GET_TELEMETRY_EVALUATION_STATUS_FOR_ORGANIZATION: OperationDescriptor =
    OperationDescriptor {
        service: &SERVICE,
        name: "GetTelemetryEvaluationStatusForOrganization",
        default_selector: "*",
        pagination: None,
        params: &[],
        outputs: EVALUATION_STATUS_OUTPUTS,
    };

pub static GET_TELEMETRY_RULE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetTelemetryRule",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: RULE_OUTPUTS,
};

pub static GET_TELEMETRY_RULE_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetTelemetryRuleForOrganization",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: RULE_OUTPUTS,
};

const RESOURCE_TELEMETRY_OUTPUTS: &[OutputField] = &[
    OutputField::new("TelemetryConfigurations", "TelemetryConfigurations", FieldKind::List),
    NEXT_TOKEN_OUT,
];

pub static LIST_RESOURCE_TELEMETRY: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListResourceTelemetry",
    default_selector: "TelemetryConfigurations",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("ResourceIdentifierPrefix", "ResourceIdentifierPrefix"),
        ParamSpec::enum_list("ResourceType", "ResourceTypes", RESOURCE_TYPES)
            .aliases(&["ResourceTypes"]),
        ParamSpec::map("TelemetryConfigurationState", "TelemetryConfigurationState"),
        ParamSpec::map("ResourceTag", "ResourceTags").aliases(&["ResourceTags"]),
        ParamSpec::integer("MaxResult", "MaxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "NextToken"),
    ],
    outputs: RESOURCE_TELEMETRY_OUTPUTS,
};

pub static LIST_RESOURCE_TELEMETRY_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListResourceTelemetryForOrganization",
    default_selector: "TelemetryConfigurations",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string_list("AccountIdentifier", "AccountIdentifiers")
            .aliases(&["AccountIdentifiers"]),
        ParamSpec::string("ResourceIdentifierPrefix", "ResourceIdentifierPrefix"),
        ParamSpec::enum_list("ResourceType", "ResourceTypes", RESOURCE_TYPES)
            .aliases(&["ResourceTypes"]),
        ParamSpec::map("TelemetryConfigurationState", "TelemetryConfigurationState"),
        ParamSpec::map("ResourceTag", "ResourceTags").aliases(&["ResourceTags"]),
        ParamSpec::integer("MaxResult", "MaxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "NextToken"),
    ],
    outputs: RESOURCE_TELEMETRY_OUTPUTS,
};

pub static LIST_TAGS_FOR_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTagsForResource",
    default_selector: "Tags",
    pagination: None,
    params: &[ParamSpec::string("ResourceARN", "ResourceARN").required()],
    outputs: &[OutputField::new("Tags", "Tags", FieldKind::Map)],
};

const TELEMETRY_RULES_OUTPUTS: &[OutputField] = &[
    OutputField::new("TelemetryRuleSummaries", "TelemetryRuleSummaries", FieldKind::List),
    NEXT_TOKEN_OUT,
];

pub static LIST_TELEMETRY_RULES: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTelemetryRules",
    default_selector: "TelemetryRuleSummaries",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("RuleNamePrefix", "RuleNamePrefix"),
        ParamSpec::integer("MaxResult", "MaxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "NextToken"),
    ],
    outputs: TELEMETRY_RULES_OUTPUTS,
};

pub static LIST_TELEMETRY_RULES_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTelemetryRulesForOrganization",
    default_selector: "TelemetryRuleSummaries",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("RuleNamePrefix", "RuleNamePrefix"),
        ParamSpec::string_list("SourceAccountId", "SourceAccountIds")
            .aliases(&["SourceAccountIds"]),
        ParamSpec::string_list("SourceOrganizationUnitId", "SourceOrganizationUnitIds")
            .aliases(&["SourceOrganizationUnitIds"]),
        ParamSpec::integer("MaxResult", "MaxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "NextToken"),
    ],
    outputs: TELEMETRY_RULES_OUTPUTS,
};

pub static START_TELEMETRY_EVALUATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "StartTelemetryEvaluation",
    default_selector: "*",
    pagination: None,
    params: &[],
    outputs: &[],
};

pub static START_TELEMETRY_EVALUATION_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "StartTelemetryEvaluationForOrganization",
    default_selector: "*",
    pagination: None,
    params: &[],
    outputs: &[],
};

pub static STOP_TELEMETRY_EVALUATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "StopTelemetryEvaluation",
    default_selector: "*",
    pagination: None,
    params: &[],
    outputs: &[],
};

pub static STOP_TELEMETRY_EVALUATION_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "StopTelemetryEvaluationForOrganization",
    default_selector: "*",
    pagination: None,
    params: &[],
    outputs: &[],
};

pub static TAG_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "TagResource",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("ResourceARN", "ResourceARN").required(),
        ParamSpec::map("Tag", "Tags").required().aliases(&["Tags"]),
    ],
    outputs: &[],
};

pub static UNTAG_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UntagResource",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("ResourceARN", "ResourceARN").required(),
        ParamSpec::string_list("TagKey", "TagKeys")
            .required()
            .aliases(&["TagKeys"]),
    ],
    outputs: &[],
};

pub static UPDATE_TELEMETRY_RULE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UpdateTelemetryRule",
    default_selector: "RuleArn",
    pagination: None,
    params: with_rule_params![ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: &[RULE_ARN_OUT],
};

pub static UPDATE_TELEMETRY_RULE_FOR_ORGANIZATION: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UpdateTelemetryRuleForOrganization",
    default_selector: "RuleArn",
    pagination: None,
    params: with_rule_params![ParamSpec::string("RuleIdentifier", "RuleIdentifier").required()],
    outputs: &[RULE_ARN_OUT],
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &CREATE_TELEMETRY_RULE,
    &CREATE_TELEMETRY_RULE_FOR_ORGANIZATION,
    &DELETE_TELEMETRY_RULE,
    &DELETE_TELEMETRY_RULE_FOR_ORGANIZATION,
    &GET_TELEMETRY_EVALUATION_STATUS,
    &GET_TELEMETRY_EVALUATION_STATUS_FOR_ORGANIZATION,
    &GET_TELEMETRY_RULE,
    &GET_TELEMETRY_RULE_FOR_ORGANIZATION,
    &LIST_RESOURCE_TELEMETRY,
    &LIST_RESOURCE_TELEMETRY_FOR_ORGANIZATION,
    &LIST_TAGS_FOR_RESOURCE,
    &LIST_TELEMETRY_RULES,
    &LIST_TELEMETRY_RULES_FOR_ORGANIZATION,
    &START_TELEMETRY_EVALUATION,
    &START_TELEMETRY_EVALUATION_FOR_ORGANIZATION,
    &STOP_TELEMETRY_EVALUATION,
    &STOP_TELEMETRY_EVALUATION_FOR_ORGANIZATION,
    &TAG_RESOURCE,
    &UNTAG_RESOURCE,
    &UPDATE_TELEMETRY_RULE,
    &UPDATE_TELEMETRY_RULE_FOR_ORGANIZATION,
];
