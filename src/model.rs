//! Identifier newtypes and wire types for the administrative API
//!
//! Everything here is a transient DTO: built per call from request
//! parameters or decoded from a response body, never cached.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Opaque repository identifier
///
/// Used both as a URL path segment and as a payload field value. Wrapping
/// the string keeps repository and group identifiers from being mixed up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(id: impl Into<String>) -> Self {
        RepositoryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryId {
    fn from(s: &str) -> Self {
        RepositoryId(s.to_string())
    }
}

impl From<String> for RepositoryId {
    fn from(s: String) -> Self {
        RepositoryId(s)
    }
}

/// Opaque repository group identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        GroupId(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        GroupId(s)
    }
}

/// A membership record inside a repository group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRepository {
    pub name: String,
    pub id: RepositoryId,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
}

/// The JSON envelope read from and written back to the group endpoint
///
/// Groups are fetched whole and mutated whole; there is no partial-update
/// protocol. Fields the client does not touch round-trip unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryGroup {
    pub data: RepositoryGroupData,
}

/// The payload of a repository group read or mutation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryGroupData {
    pub id: GroupId,
    pub provider: String,
    pub name: String,
    pub repositories: Vec<GroupRepository>,
    pub format: String,
    pub repo_type: String,
    pub exposed: bool,
    #[serde(rename = "contentResourceURI")]
    pub content_resource_uri: String,
}

impl RepositoryGroup {
    /// Whether the group contains a member with the given id, under plain
    /// string equality. No normalization, no case-folding.
    pub fn contains(&self, id: &RepositoryId) -> bool {
        self.data.repositories.iter().any(|r| r.id == *id)
    }

    /// Drop the member with the given id, preserving the order of the rest.
    pub fn remove_member(&mut self, id: &RepositoryId) {
        self.data.repositories.retain(|r| r.id != *id);
    }
}

/// Descriptor POSTed to create a hosted repository
///
/// Serializes to the `<repository><data>...</data></repository>` XML
/// document older servers expect, or to the equivalent `{"data": {...}}`
/// JSON envelope for newer ones.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "repository")]
pub struct CreateRepository {
    pub data: CreateRepositoryData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryData {
    #[serde(rename = "contentResourceURI")]
    pub content_resource_uri: String,
    pub id: RepositoryId,
    pub name: String,
    pub provider: String,
    pub provider_role: String,
    pub format: String,
    pub repo_type: String,
    pub repo_policy: String,
    pub exposed: bool,
}

impl CreateRepository {
    /// Build the descriptor for a hosted Maven2 SNAPSHOT repository.
    /// The repository name is the id; everything else is fixed.
    pub fn snapshot(id: &RepositoryId, base_url: &str) -> Self {
        CreateRepository {
            data: CreateRepositoryData {
                content_resource_uri: format!("{}/content/repositories/{}", base_url, id),
                id: id.clone(),
                name: id.to_string(),
                provider: "maven2".to_string(),
                provider_role: "org.sonatype.nexus.proxy.repository.Repository".to_string(),
                format: "maven2".to_string(),
                repo_type: "hosted".to_string(),
                repo_policy: "SNAPSHOT".to_string(),
                exposed: true,
            },
        }
    }

    /// Serialize as the XML document form.
    pub fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(self).map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Serialize as the JSON envelope form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(members: &[&str]) -> RepositoryGroup {
        RepositoryGroup {
            data: RepositoryGroupData {
                id: GroupId::from("snapshotgroup"),
                provider: "maven2".to_string(),
                name: "SnapshotGroup".to_string(),
                repositories: members
                    .iter()
                    .map(|m| GroupRepository {
                        name: m.to_string(),
                        id: RepositoryId::from(*m),
                        resource_uri: "blah".to_string(),
                    })
                    .collect(),
                format: "maven2".to_string(),
                repo_type: "group".to_string(),
                exposed: true,
                content_resource_uri: "blah".to_string(),
            },
        }
    }

    #[test]
    fn test_group_membership() {
        let group = group_with(&["foo", "bar"]);
        assert!(group.contains(&RepositoryId::from("foo")));
        assert!(group.contains(&RepositoryId::from("bar")));
        assert!(!group.contains(&RepositoryId::from("baz")));

        // Plain string equality, no case-folding
        assert!(!group.contains(&RepositoryId::from("FOO")));

        let empty = group_with(&[]);
        assert!(!empty.contains(&RepositoryId::from("foo")));
    }

    #[test]
    fn test_remove_member_preserves_order() {
        let mut group = group_with(&["a", "b", "c"]);
        group.remove_member(&RepositoryId::from("b"));

        let ids: Vec<&str> = group
            .data
            .repositories
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);

        // Removing a non-member changes nothing
        group.remove_member(&RepositoryId::from("missing"));
        assert_eq!(group.data.repositories.len(), 2);
    }

    #[test]
    fn test_group_envelope_round_trip() {
        let payload = r#"{
   "data" : {
      "provider" : "maven2",
      "name" : "SnapshotGroup",
      "repositories" : [
         {
            "name" : "plat.trnk.trnk679",
            "id" : "plat.trnk.trnk679",
            "resourceURI" : "http://localhost:8081/nexus/service/local/repo_groups/snapshotgroup/plat.trnk.trnk679"
         }
      ],
      "format" : "maven2",
      "repoType" : "group",
      "exposed" : true,
      "id" : "snapshotgroup",
      "contentResourceURI" : "http://localhost:8081/nexus/content/groups/snapshotgroup"
   }
}"#;

        let group: RepositoryGroup = serde_json::from_str(payload).unwrap();
        assert_eq!(group.data.id, GroupId::from("snapshotgroup"));
        assert_eq!(group.data.repo_type, "group");
        assert_eq!(
            group.data.content_resource_uri,
            "http://localhost:8081/nexus/content/groups/snapshotgroup"
        );
        assert_eq!(group.data.repositories.len(), 1);
        assert!(group.contains(&RepositoryId::from("plat.trnk.trnk679")));

        let json = serde_json::to_string(&group).unwrap();
        assert!(json.contains("\"repoType\":\"group\""));
        assert!(json.contains(
            "\"contentResourceURI\":\"http://localhost:8081/nexus/content/groups/snapshotgroup\""
        ));
        assert!(json.contains("\"resourceURI\""));
    }

    #[test]
    fn test_snapshot_descriptor_constants() {
        let descriptor = CreateRepository::snapshot(
            &RepositoryId::from("plat.trnk.trnk679"),
            "http://localhost:8081/nexus",
        );

        assert_eq!(descriptor.data.name, "plat.trnk.trnk679");
        assert_eq!(descriptor.data.provider, "maven2");
        assert_eq!(descriptor.data.repo_type, "hosted");
        assert_eq!(descriptor.data.repo_policy, "SNAPSHOT");
        assert_eq!(descriptor.data.format, "maven2");
        assert!(descriptor.data.exposed);
        assert_eq!(
            descriptor.data.content_resource_uri,
            "http://localhost:8081/nexus/content/repositories/plat.trnk.trnk679"
        );
    }

    #[test]
    fn test_snapshot_descriptor_xml_shape() {
        let descriptor =
            CreateRepository::snapshot(&RepositoryId::from("repo1"), "http://nexus.example.com");
        let xml = descriptor.to_xml().unwrap();

        assert!(xml.starts_with("<repository>"));
        assert!(xml.ends_with("</repository>"));
        assert!(xml.contains("<data>"));
        assert!(xml.contains("<id>repo1</id>"));
        assert!(xml.contains("<name>repo1</name>"));
        assert!(xml.contains("<repoPolicy>SNAPSHOT</repoPolicy>"));
        assert!(xml.contains("<repoType>hosted</repoType>"));
        assert!(xml.contains("<exposed>true</exposed>"));
        assert!(xml.contains(
            "<contentResourceURI>http://nexus.example.com/content/repositories/repo1</contentResourceURI>"
        ));
    }

    #[test]
    fn test_snapshot_descriptor_json_shape() {
        let descriptor =
            CreateRepository::snapshot(&RepositoryId::from("repo1"), "http://nexus.example.com");
        let json = descriptor.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["id"], "repo1");
        assert_eq!(value["data"]["provider"], "maven2");
        assert_eq!(value["data"]["repoPolicy"], "SNAPSHOT");
        assert_eq!(value["data"]["exposed"], true);
        assert_eq!(
            value["data"]["contentResourceURI"],
            "http://nexus.example.com/content/repositories/repo1"
        );
    }
}
