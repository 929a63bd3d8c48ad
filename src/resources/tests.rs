//! Tests for resource kinds

use super::*;
use crate::error::Error;
use crate::listing::{InMemoryListing, ListingOperation};
use crate::loader::load_service;
use crate::pagination::{ContinuationToken, RawResult};
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

#[test]
fn test_key_pair_codec() {
    let key = KeyPair::codec()
        .decode(&json!({
            "KeyName": "deploy",
            "KeyFingerprint": "1f:51:ae",
            "KeyPairId": "key-0abc"
        }))
        .unwrap();

    assert_eq!(
        key,
        KeyPair {
            key_name: "deploy".to_string(),
            key_fingerprint: Some("1f:51:ae".to_string()),
            key_pair_id: Some("key-0abc".to_string()),
        }
    );
    assert_eq!(key.identifier(), "deploy");
}

#[test]
fn test_instance_codec() {
    let instance = Instance::codec()
        .decode(&json!({
            "InstanceId": "i-123",
            "InstanceType": "t3.micro",
            "State": {"Code": 16, "Name": "running"},
            "LaunchTime": "2024-03-01T12:30:00Z",
            "Tags": [{"Key": "Name", "Value": "web"}]
        }))
        .unwrap();

    assert_eq!(instance.identifier(), "i-123");
    assert_eq!(instance.state.as_ref().unwrap().name, "running");
    assert_eq!(
        instance.launch_time,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
    );
    assert_eq!(instance.tag("Name"), Some("web"));
    assert_eq!(instance.tag("Team"), None);
}

#[test]
fn test_volume_and_security_group_codecs() {
    let volume = Volume::codec()
        .decode(&json!({"VolumeId": "vol-1", "Size": 8, "State": "in-use"}))
        .unwrap();
    assert_eq!(volume.identifier(), "vol-1");
    assert_eq!(volume.size, Some(8));

    let group = SecurityGroup::codec()
        .decode(&json!({"GroupId": "sg-1", "GroupName": "default"}))
        .unwrap();
    assert_eq!(group.identifier(), "sg-1");
    assert_eq!(group.vpc_id, None);
}

#[test]
fn test_codec_rejects_missing_identifier() {
    let err = KeyPair::codec()
        .decode(&json!({"KeyFingerprint": "aa"}))
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("KeyPair"));
}

#[test_case(KeyPair::COLLECTION, KeyPair::LIST_ACTION ; "key pairs")]
#[test_case(Instance::COLLECTION, Instance::LIST_ACTION ; "instances")]
#[test_case(Volume::COLLECTION, Volume::LIST_ACTION ; "volumes")]
#[test_case(SecurityGroup::COLLECTION, SecurityGroup::LIST_ACTION ; "security groups")]
fn test_kinds_match_builtin_service(collection: &str, action: &str) {
    let def = load_service("ec2").unwrap();
    assert_eq!(def.collection(collection).unwrap().action, action);
}

#[test]
fn test_request_uses_list_action() {
    let params = Volume::request();
    assert_eq!(params.action, "DescribeVolumes");
    assert!(params.params.is_empty());
    assert_eq!(params.page_size, None);
}

#[tokio::test]
async fn test_ec2_key_pairs_over_listing() {
    let listing = Arc::new(
        InMemoryListing::new()
            .first_page(RawResult::new(
                vec![json!({"KeyName": "a"}), json!({"KeyName": "b"})],
                Some(ContinuationToken::from("T1")),
            ))
            .page_after("T1", RawResult::last(vec![json!({"KeyName": "c"})])),
    );
    let dyn_listing: Arc<dyn ListingOperation> = listing.clone();
    let ec2 = Ec2::new(dyn_listing);

    let keys: Vec<KeyPair> = ec2.key_pairs().resources().into_stream().try_collect().await.unwrap();
    let names: Vec<_> = keys.iter().map(KeyPair::identifier).collect();

    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(listing
        .calls()
        .iter()
        .all(|call| call.params.action == "DescribeKeyPairs"));
}

#[tokio::test]
async fn test_ec2_collection_with_filters() {
    let listing = Arc::new(InMemoryListing::new().first_page(RawResult::last(vec![])));
    let dyn_listing: Arc<dyn ListingOperation> = listing.clone();
    let ec2 = Ec2::new(dyn_listing);

    let params = Instance::request()
        .param("Filter.1.Name", "instance-state-name")
        .page_size(50);
    let page = ec2.collection::<Instance>(params).first_page().await.unwrap();

    assert!(page.is_empty());
    let call = &listing.calls()[0];
    assert_eq!(call.params.action, "DescribeInstances");
    assert_eq!(call.params.page_size, Some(50));
    assert_eq!(
        call.params.get("Filter.1.Name"),
        Some(&json!("instance-state-name"))
    );
}

#[test]
fn test_ec2_builtin() {
    assert!(Ec2::builtin().is_ok());
}
