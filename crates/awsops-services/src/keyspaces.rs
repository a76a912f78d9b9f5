//! Amazon Keyspaces (for Apache Cassandra)
//!
//! awsJson1_0 protocol, camelCase wire members, `nextToken` pagination.

use awsops_core::{
    FieldKind, OperationDescriptor, OutputField, Pagination, ParamSpec, Protocol,
    ServiceDescriptor,
};

pub static SERVICE: ServiceDescriptor = ServiceDescriptor {
    name: "keyspaces",
    title: "Amazon Keyspaces",
    signing_name: "cassandra",
    endpoint_prefix: "cassandra",
    protocol: Protocol::AwsJson1_0 {
        target_prefix: "KeyspacesService",
    },
};

const THROUGHPUT_MODES: &[&str] = &["PAY_PER_REQUEST", "PROVISIONED"];
const ENCRYPTION_TYPES: &[&str] = &["CUSTOMER_MANAGED_KMS_KEY", "AWS_OWNED_KMS_KEY"];
const PITR_STATUSES: &[&str] = &["ENABLED", "DISABLED"];
const ENABLED_ONLY: &[&str] = &["ENABLED"];
const REPLICATION_STRATEGIES: &[&str] = &["SINGLE_REGION", "MULTI_REGION"];
const CDC_STATUSES: &[&str] = &["ENABLED", "ENABLED_WITH_TTL", "DISABLED", "DISABLING"];
const CDC_VIEW_TYPES: &[&str] = &["NEW_IMAGE", "OLD_IMAGE", "KEYS_ONLY", "NEW_AND_OLD_IMAGES"];
const CDC_PROPAGATE_TAGS: &[&str] = &["TABLE", "NONE"];

const PAGINATION: Option<Pagination> = Some(Pagination {
    token_param: "NextToken",
    output_token: "nextToken",
});

const NEXT_TOKEN_OUT: OutputField = OutputField::new("NextToken", "nextToken", FieldKind::String);
const RESOURCE_ARN_OUT: OutputField =
    OutputField::new("ResourceArn", "resourceArn", FieldKind::String);

/// Parameters shared by table create and update: capacity, encryption,
/// recovery, TTL, timestamps, change data capture and both autoscaling
/// policies, followed by the operation's own parameters.
macro_rules! table_settings {
    ($($param:expr),* $(,)?) => {
        &[
            $($param,)*
            ParamSpec::enumeration(
                "CapacitySpecification_ThroughputMode",
                "capacitySpecification.throughputMode",
                THROUGHPUT_MODES,
            )
            .aliases(&["ThroughputMode"]),
            ParamSpec::integer(
                "CapacitySpecification_ReadCapacityUnit",
                "capacitySpecification.readCapacityUnits",
            )
            .aliases(&["ReadCapacityUnits"]),
            ParamSpec::integer(
                "CapacitySpecification_WriteCapacityUnit",
                "capacitySpecification.writeCapacityUnits",
            )
            .aliases(&["WriteCapacityUnits"]),
            ParamSpec::enumeration(
                "EncryptionSpecification_Type",
                "encryptionSpecification.type",
                ENCRYPTION_TYPES,
            )
            .aliases(&["EncryptionType"]),
            ParamSpec::string(
                "EncryptionSpecification_KmsKeyIdentifier",
                "encryptionSpecification.kmsKeyIdentifier",
            )
            .aliases(&["KmsKeyIdentifier"]),
            ParamSpec::enumeration(
                "PointInTimeRecovery_Status",
                "pointInTimeRecovery.status",
                PITR_STATUSES,
            ),
            ParamSpec::enumeration("Ttl_Status", "ttl.status", ENABLED_ONLY),
            ParamSpec::integer("DefaultTimeToLive", "defaultTimeToLive"),
            ParamSpec::enumeration(
                "ClientSideTimestamps_Status",
                "clientSideTimestamps.status",
                ENABLED_ONLY,
            ),
            ParamSpec::enumeration("CdcSpecification_Status", "cdcSpecification.status", CDC_STATUSES),
            ParamSpec::enumeration(
                "CdcSpecification_ViewType",
                "cdcSpecification.viewType",
                CDC_VIEW_TYPES,
            ),
            ParamSpec::enumeration(
                "CdcSpecification_PropagateTag",
                "cdcSpecification.propagateTags",
                CDC_PROPAGATE_TAGS,
            ),
            ParamSpec::structure_list("CdcSpecification_Tag", "cdcSpecification.tags"),
            ParamSpec::structure_list("ReplicaSpecification", "replicaSpecifications")
                .aliases(&["ReplicaSpecifications"]),
            ParamSpec::boolean(
                "ReadCapacityAutoScaling_AutoScalingDisabled",
                "autoScalingSpecification.readCapacityAutoScaling.autoScalingDisabled",
            ),
            ParamSpec::integer(
                "ReadCapacityAutoScaling_MinimumUnit",
                "autoScalingSpecification.readCapacityAutoScaling.minimumUnits",
            ),
            ParamSpec::integer(
                "ReadCapacityAutoScaling_MaximumUnit",
                "autoScalingSpecification.readCapacityAutoScaling.maximumUnits",
            ),
            ParamSpec::boolean(
                "ReadTargetTrackingScalingPolicyConfiguration_DisableScaleIn",
                "autoScalingSpecification.readCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.disableScaleIn",
            ),
            ParamSpec::integer(
                "ReadTargetTrackingScalingPolicyConfiguration_ScaleInCooldown",
                "autoScalingSpecification.readCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.scaleInCooldown",
            ),
            ParamSpec::integer(
                "ReadTargetTrackingScalingPolicyConfiguration_ScaleOutCooldown",
                "autoScalingSpecification.readCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.scaleOutCooldown",
            ),
            ParamSpec::double(
                "ReadTargetTrackingScalingPolicyConfiguration_TargetValue",
                "autoScalingSpecification.readCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.targetValue",
            )
            .aliases(&["ReadTargetValue"]),
            ParamSpec::boolean(
                "WriteCapacityAutoScaling_AutoScalingDisabled",
                "autoScalingSpecification.writeCapacityAutoScaling.autoScalingDisabled",
            ),
            ParamSpec::integer(
                "WriteCapacityAutoScaling_MinimumUnit",
                "autoScalingSpecification.writeCapacityAutoScaling.minimumUnits",
            ),
            ParamSpec::integer(
                "WriteCapacityAutoScaling_MaximumUnit",
                "autoScalingSpecification.writeCapacityAutoScaling.maximumUnits",
            ),
            ParamSpec::boolean(
                "WriteTargetTrackingScalingPolicyConfiguration_DisableScaleIn",
                "autoScalingSpecification.writeCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.disableScaleIn",
            ),
            ParamSpec::integer(
                "WriteTargetTrackingScalingPolicyConfiguration_ScaleInCooldown",
                "autoScalingSpecification.writeCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.scaleInCooldown",
            ),
            ParamSpec::integer(
                "WriteTargetTrackingScalingPolicyConfiguration_ScaleOutCooldown",
                "autoScalingSpecification.writeCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.scaleOutCooldown",
            ),
            ParamSpec::double(
                "WriteTargetTrackingScalingPolicyConfiguration_TargetValue",
                "autoScalingSpecification.writeCapacityAutoScaling.scalingPolicy.targetTrackingScalingPolicyConfiguration.targetValue",
            )
            .aliases(&["WriteTargetValue"]),
        ]
    };
}

pub static CREATE_KEYSPACE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "CreateKeyspace",
    default_selector: "ResourceArn",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::enumeration(
            "ReplicationSpecification_ReplicationStrategy",
            "replicationSpecification.replicationStrategy",
            REPLICATION_STRATEGIES,
        )
        .aliases(&["ReplicationStrategy"]),
        ParamSpec::string_list(
            "ReplicationSpecification_RegionList",
            "replicationSpecification.regionList",
        )
        .aliases(&["RegionList"]),
        ParamSpec::structure_list("Tag", "tags").aliases(&["Tags"]),
    ],
    outputs: &[RESOURCE_ARN_OUT],
};

pub static CREATE_TABLE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "CreateTable",
    default_selector: "ResourceArn",
    pagination: None,
    params: table_settings![
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
        ParamSpec::structure_list("SchemaDefinition_AllColumn", "schemaDefinition.allColumns")
            .required()
            .aliases(&["AllColumns"]),
        ParamSpec::structure_list(
            "SchemaDefinition_PartitionKey",
            "schemaDefinition.partitionKeys",
        )
        .required()
        .aliases(&["PartitionKeys"]),
        ParamSpec::structure_list(
            "SchemaDefinition_ClusteringKey",
            "schemaDefinition.clusteringKeys",
        )
        .aliases(&["ClusteringKeys"]),
        ParamSpec::structure_list(
            "SchemaDefinition_StaticColumn",
            "schemaDefinition.staticColumns",
        )
        .aliases(&["StaticColumns"]),
        ParamSpec::string("Comment_Message", "comment.message").aliases(&["Comment"]),
        ParamSpec::structure_list("Tag", "tags").aliases(&["Tags"]),
    ],
    outputs: &[RESOURCE_ARN_OUT],
};

pub static CREATE_TYPE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "CreateType",
    default_selector: "KeyspaceArn",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TypeName", "typeName").required(),
        ParamSpec::structure_list("FieldDefinition", "fieldDefinitions")
            .required()
            .aliases(&["FieldDefinitions"]),
    ],
    outputs: &[
        OutputField::new("KeyspaceArn", "keyspaceArn", FieldKind::String),
        OutputField::new("TypeName", "typeName", FieldKind::String),
    ],
};

pub static DELETE_KEYSPACE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "DeleteKeyspace",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("KeyspaceName", "keyspaceName").required()],
    outputs: &[],
};

pub static DELETE_TABLE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "DeleteTable",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
    ],
    outputs: &[],
};

pub static DELETE_TYPE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "DeleteType",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TypeName", "typeName").required(),
    ],
    outputs: &[
        OutputField::new("KeyspaceArn", "keyspaceArn", FieldKind::String),
        OutputField::new("TypeName", "typeName", FieldKind::String),
    ],
};

pub static GET_KEYSPACE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetKeyspace",
    default_selector: "*",
    pagination: None,
    params: &[ParamSpec::string("KeyspaceName", "keyspaceName").required()],
    outputs: &[
        OutputField::new("KeyspaceName", "keyspaceName", FieldKind::String),
        RESOURCE_ARN_OUT,
        OutputField::new("ReplicationStrategy", "replicationStrategy", FieldKind::String),
        OutputField::new("ReplicationRegions", "replicationRegions", FieldKind::List),
        OutputField::new(
            "ReplicationGroupStatuses",
            "replicationGroupStatuses",
            FieldKind::List,
        ),
    ],
};

pub static GET_TABLE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetTable",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
    ],
    outputs: &[
        OutputField::new("KeyspaceName", "keyspaceName", FieldKind::String),
        OutputField::new("TableName", "tableName", FieldKind::String),
        RESOURCE_ARN_OUT,
        OutputField::new("CreationTimestamp", "creationTimestamp", FieldKind::Timestamp),
        OutputField::new("Status", "status", FieldKind::String),
        OutputField::new("SchemaDefinition", "schemaDefinition", FieldKind::Structure),
        OutputField::new("CapacitySpecification", "capacitySpecification", FieldKind::Structure),
        OutputField::new(
            "EncryptionSpecification",
            "encryptionSpecification",
            FieldKind::Structure,
        ),
        OutputField::new("PointInTimeRecovery", "pointInTimeRecovery", FieldKind::Structure),
        OutputField::new("Ttl", "ttl", FieldKind::Structure),
        OutputField::new("DefaultTimeToLive", "defaultTimeToLive", FieldKind::Integer),
        OutputField::new("Comment", "comment", FieldKind::Structure),
        OutputField::new("ClientSideTimestamps", "clientSideTimestamps", FieldKind::Structure),
        OutputField::new("ReplicaSpecifications", "replicaSpecifications", FieldKind::List),
        OutputField::new("LatestStreamArn", "latestStreamArn", FieldKind::String),
        OutputField::new("CdcSpecification", "cdcSpecification", FieldKind::Structure),
    ],
};

pub static GET_TABLE_AUTO_SCALING_SETTINGS: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetTableAutoScalingSettings",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
    ],
    outputs: &[
        OutputField::new("KeyspaceName", "keyspaceName", FieldKind::String),
        OutputField::new("TableName", "tableName", FieldKind::String),
        RESOURCE_ARN_OUT,
        OutputField::new(
            "AutoScalingSpecification",
            "autoScalingSpecification",
            FieldKind::Structure,
        ),
        OutputField::new("ReplicaSpecifications", "replicaSpecifications", FieldKind::List),
    ],
};

pub static GET_TYPE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "GetType",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TypeName", "typeName").required(),
    ],
    outputs: &[
        OutputField::new("KeyspaceName", "keyspaceName", FieldKind::String),
        OutputField::new("TypeName", "typeName", FieldKind::String),
        OutputField::new("FieldDefinitions", "fieldDefinitions", FieldKind::List),
        OutputField::new(
            "LastModifiedTimestamp",
            "lastModifiedTimestamp",
            FieldKind::Timestamp,
        ),
        OutputField::new("Status", "status", FieldKind::String),
        OutputField::new("DirectReferringTables", "directReferringTables", FieldKind::List),
        OutputField::new("DirectParentTypes", "directParentTypes", FieldKind::List),
        OutputField::new("MaxNestingDepth", "maxNestingDepth", FieldKind::Integer),
        OutputField::new("KeyspaceArn", "keyspaceArn", FieldKind::String),
    ],
};

pub static LIST_KEYSPACES: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListKeyspaces",
    default_selector: "Keyspaces",
    pagination: PAGINATION,
    params: &[
        ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "nextToken"),
    ],
    outputs: &[
        OutputField::new("Keyspaces", "keyspaces", FieldKind::List),
        NEXT_TOKEN_OUT,
    ],
};

pub static LIST_TABLES: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTables",
    default_selector: "Tables",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "nextToken"),
    ],
    outputs: &[
        OutputField::new("Tables", "tables", FieldKind::List),
        NEXT_TOKEN_OUT,
    ],
};

pub static LIST_TAGS_FOR_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTagsForResource",
    default_selector: "Tags",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("ResourceArn", "resourceArn").required(),
        ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "nextToken"),
    ],
    outputs: &[OutputField::new("Tags", "tags", FieldKind::List), NEXT_TOKEN_OUT],
};

pub static LIST_TYPES: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "ListTypes",
    default_selector: "Types",
    pagination: PAGINATION,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
        ParamSpec::string("NextToken", "nextToken"),
    ],
    outputs: &[
        OutputField::new("Types", "types", FieldKind::List),
        NEXT_TOKEN_OUT,
    ],
};

pub static RESTORE_TABLE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "RestoreTable",
    default_selector: "RestoredTableARN",
    pagination: None,
    params: &[
        ParamSpec::string("SourceKeyspaceName", "sourceKeyspaceName").required(),
        ParamSpec::string("SourceTableName", "sourceTableName").required(),
        ParamSpec::string("TargetKeyspaceName", "targetKeyspaceName").required(),
        ParamSpec::string("TargetTableName", "targetTableName").required(),
        ParamSpec::timestamp("RestoreTimestamp", "restoreTimestamp"),
        ParamSpec::enumeration(
            "CapacitySpecificationOverride_ThroughputMode",
            "capacitySpecificationOverride.throughputMode",
            THROUGHPUT_MODES,
        ),
        ParamSpec::integer(
            "CapacitySpecificationOverride_ReadCapacityUnit",
            "capacitySpecificationOverride.readCapacityUnits",
        ),
        ParamSpec::integer(
            "CapacitySpecificationOverride_WriteCapacityUnit",
            "capacitySpecificationOverride.writeCapacityUnits",
        ),
        ParamSpec::enumeration(
            "EncryptionSpecificationOverride_Type",
            "encryptionSpecificationOverride.type",
            ENCRYPTION_TYPES,
        ),
        ParamSpec::string(
            "EncryptionSpecificationOverride_KmsKeyIdentifier",
            "encryptionSpecificationOverride.kmsKeyIdentifier",
        ),
        ParamSpec::enumeration(
            "PointInTimeRecoveryOverride_Status",
            "pointInTimeRecoveryOverride.status",
            PITR_STATUSES,
        ),
        ParamSpec::structure_list("TagsOverride", "tagsOverride"),
        ParamSpec::map("AutoScalingSpecification", "autoScalingSpecification"),
        ParamSpec::structure_list("ReplicaSpecification", "replicaSpecifications")
            .aliases(&["ReplicaSpecifications"]),
    ],
    outputs: &[OutputField::new(
        "RestoredTableARN",
        "restoredTableARN",
        FieldKind::String,
    )],
};

pub static TAG_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "TagResource",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("ResourceArn", "resourceArn").required(),
        ParamSpec::structure_list("Tag", "tags").required().aliases(&["Tags"]),
    ],
    outputs: &[],
};

pub static UNTAG_RESOURCE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UntagResource",
    default_selector: "*",
    pagination: None,
    params: &[
        ParamSpec::string("ResourceArn", "resourceArn").required(),
        ParamSpec::structure_list("Tag", "tags").required().aliases(&["Tags"]),
    ],
    outputs: &[],
};

pub static UPDATE_KEYSPACE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UpdateKeyspace",
    default_selector: "ResourceArn",
    pagination: None,
    params: &[
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::enumeration(
            "ReplicationSpecification_ReplicationStrategy",
            "replicationSpecification.replicationStrategy",
            REPLICATION_STRATEGIES,
        )
        .aliases(&["ReplicationStrategy"]),
        ParamSpec::string_list(
            "ReplicationSpecification_RegionList",
            "replicationSpecification.regionList",
        )
        .aliases(&["RegionList"]),
        ParamSpec::enumeration(
            "ClientSideTimestamps_Status",
            "clientSideTimestamps.status",
            ENABLED_ONLY,
        ),
    ],
    outputs: &[RESOURCE_ARN_OUT],
};

pub static UPDATE_TABLE: OperationDescriptor = OperationDescriptor {
    service: &SERVICE,
    name: "UpdateTable",
    default_selector: "ResourceArn",
    pagination: None,
    params: table_settings![
        ParamSpec::string("KeyspaceName", "keyspaceName").required(),
        ParamSpec::string("TableName", "tableName").required(),
        ParamSpec::structure_list("AddColumn", "addColumns").aliases(&["AddColumns"]),
    ],
    outputs: &[RESOURCE_ARN_OUT],
};

pub static OPERATIONS: &[&OperationDescriptor] = &[
    &CREATE_KEYSPACE,
    &CREATE_TABLE,
    &CREATE_TYPE,
    &DELETE_KEYSPACE,
    &DELETE_TABLE,
    &DELETE_TYPE,
    &GET_KEYSPACE,
    &GET_TABLE,
    &GET_TABLE_AUTO_SCALING_SETTINGS,
    &GET_TYPE,
    &LIST_KEYSPACES,
    &LIST_TABLES,
    &LIST_TAGS_FOR_RESOURCE,
    &LIST_TYPES,
    &RESTORE_TABLE,
    &TAG_RESOURCE,
    &UNTAG_RESOURCE,
    &UPDATE_KEYSPACE,
    &UPDATE_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use awsops_core::{bind, build_request, CoreError};
    use serde_json::{json, Value};

    fn request(op: &OperationDescriptor, inputs: Value) -> Value {
        let Value::Object(members) = inputs else {
            panic!("inputs must be an object");
        };
        let bound = bind(op, members).unwrap();
        build_request(op, &bound).unwrap().into_value()
    }

    #[test]
    fn test_all_descriptors_valid() {
        for op in OPERATIONS {
            op.validate().unwrap_or_else(|e| panic!("{}: {}", op.name, e));
        }
        assert_eq!(OPERATIONS.len(), 19);
    }

    #[test]
    fn test_create_table_requires_table_name() {
        let err = bind(&CREATE_TABLE, vec![("KeyspaceName", json!("ks1"))]).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingRequiredParameter {
                operation: "keyspaces:CreateTable".into(),
                name: "TableName".into(),
            }
        );
    }

    #[test]
    fn test_create_table_envelope() {
        let body = request(
            &CREATE_TABLE,
            json!({
                "KeyspaceName": "ks1",
                "TableName": "orders",
                "AllColumns": [{"name": "id", "type": "text"}, {"name": "total", "type": "int"}],
                "PartitionKeys": {"name": "id"},
                "ReadCapacityUnits": 5,
                "ReadTargetValue": 70,
            }),
        );

        assert_eq!(
            body,
            json!({
                "keyspaceName": "ks1",
                "tableName": "orders",
                "schemaDefinition": {
                    "allColumns": [{"name": "id", "type": "text"}, {"name": "total", "type": "int"}],
                    "partitionKeys": [{"name": "id"}],
                },
                "capacitySpecification": {"readCapacityUnits": 5},
                "autoScalingSpecification": {
                    "readCapacityAutoScaling": {
                        "scalingPolicy": {
                            "targetTrackingScalingPolicyConfiguration": {"targetValue": 70.0}
                        }
                    }
                },
            })
        );
    }

    #[test]
    fn test_update_table_omits_untouched_groups() {
        let body = request(
            &UPDATE_TABLE,
            json!({"KeyspaceName": "ks1", "TableName": "orders", "PointInTimeRecovery_Status": "enabled"}),
        );
        assert_eq!(
            body,
            json!({
                "keyspaceName": "ks1",
                "tableName": "orders",
                "pointInTimeRecovery": {"status": "ENABLED"},
            })
        );
    }

    #[test]
    fn test_restore_timestamp_serializes_as_epoch_seconds() {
        let body = request(
            &RESTORE_TABLE,
            json!({
                "SourceKeyspaceName": "ks1",
                "SourceTableName": "t1",
                "TargetKeyspaceName": "ks1",
                "TargetTableName": "t1_restored",
                "RestoreTimestamp": "2024-05-01T00:00:00Z",
            }),
        );
        assert_eq!(body["restoreTimestamp"], json!(1714521600));
    }

    #[test]
    fn test_keyspace_replication_group() {
        let body = request(
            &CREATE_KEYSPACE,
            json!({"KeyspaceName": "ks1", "ReplicationStrategy": "multi_region", "RegionList": ["us-east-1", "eu-west-1"]}),
        );
        assert_eq!(
            body["replicationSpecification"],
            json!({"replicationStrategy": "MULTI_REGION", "regionList": ["us-east-1", "eu-west-1"]})
        );
    }
}
