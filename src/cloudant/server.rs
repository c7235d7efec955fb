//! Server information, throughput and activity tracker endpoints

use super::{require, CloudantV1};
use crate::error::{Error, Result};
use crate::models::{
    ActiveTask, ActivityTrackerEvents, CapacityThroughputInformation, CurrentThroughputInformation,
    MembershipInformation, OkResult, ServerInformation, UpInformation, UuidsResult,
};
use crate::types::StringMap;
use reqwest::Method;
use serde_json::json;

/// Options for [`CloudantV1::get_server_information`]
#[derive(Debug, Clone, Default)]
pub struct GetServerInformationOptions {
    pub headers: StringMap,
}

option_setters!(GetServerInformationOptions {});

/// Options for [`CloudantV1::get_membership_information`]
#[derive(Debug, Clone, Default)]
pub struct GetMembershipInformationOptions {
    pub headers: StringMap,
}

option_setters!(GetMembershipInformationOptions {});

/// Options for [`CloudantV1::get_uuids`]
#[derive(Debug, Clone, Default)]
pub struct GetUuidsOptions {
    /// Number of UUIDs to return
    pub count: Option<u32>,
    pub headers: StringMap,
}

option_setters!(GetUuidsOptions { count: u32 });

/// Options for [`CloudantV1::get_up_information`]
#[derive(Debug, Clone, Default)]
pub struct GetUpInformationOptions {
    pub headers: StringMap,
}

option_setters!(GetUpInformationOptions {});

/// Options for [`CloudantV1::get_active_tasks`]
#[derive(Debug, Clone, Default)]
pub struct GetActiveTasksOptions {
    pub headers: StringMap,
}

option_setters!(GetActiveTasksOptions {});

/// Options for [`CloudantV1::get_capacity_throughput_information`]
#[derive(Debug, Clone, Default)]
pub struct GetCapacityThroughputInformationOptions {
    pub headers: StringMap,
}

option_setters!(GetCapacityThroughputInformationOptions {});

/// Options for [`CloudantV1::put_capacity_throughput_configuration`]
#[derive(Debug, Clone, Default)]
pub struct PutCapacityThroughputConfigurationOptions {
    /// Number of throughput blocks to provision
    pub blocks: u32,
    pub headers: StringMap,
}

impl PutCapacityThroughputConfigurationOptions {
    pub fn new(blocks: u32) -> Self {
        Self {
            blocks,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PutCapacityThroughputConfigurationOptions {});

/// Options for [`CloudantV1::get_current_throughput_information`]
#[derive(Debug, Clone, Default)]
pub struct GetCurrentThroughputInformationOptions {
    pub headers: StringMap,
}

option_setters!(GetCurrentThroughputInformationOptions {});

/// Options for [`CloudantV1::get_activity_tracker_events`]
#[derive(Debug, Clone, Default)]
pub struct GetActivityTrackerEventsOptions {
    pub headers: StringMap,
}

option_setters!(GetActivityTrackerEventsOptions {});

/// Options for [`CloudantV1::post_activity_tracker_events`]
#[derive(Debug, Clone, Default)]
pub struct PostActivityTrackerEventsOptions {
    /// `management` must be present; `data` is optional
    pub types: Vec<String>,
    pub headers: StringMap,
}

impl PostActivityTrackerEventsOptions {
    pub fn new(types: Vec<String>) -> Self {
        Self {
            types,
            headers: StringMap::new(),
        }
    }
}

option_setters!(PostActivityTrackerEventsOptions {});

impl CloudantV1 {
    /// Retrieve server instance information
    pub async fn get_server_information(
        &self,
        options: &GetServerInformationOptions,
    ) -> Result<ServerInformation> {
        let request = self.request("getServerInformation", Method::GET, "/", &[], &options.headers)?;
        self.send(request).await
    }

    /// Retrieve the nodes that make up the cluster
    pub async fn get_membership_information(
        &self,
        options: &GetMembershipInformationOptions,
    ) -> Result<MembershipInformation> {
        let request = self.request(
            "getMembershipInformation",
            Method::GET,
            "/_membership",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Generate server-side UUIDs
    pub async fn get_uuids(&self, options: &GetUuidsOptions) -> Result<UuidsResult> {
        let request = self
            .request("getUuids", Method::GET, "/_uuids", &[], &options.headers)?
            .query_opt("count", options.count);
        self.send(request).await
    }

    /// Health check used by load balancers
    pub async fn get_up_information(&self, options: &GetUpInformationOptions) -> Result<UpInformation> {
        let request = self.request("getUpInformation", Method::GET, "/_up", &[], &options.headers)?;
        self.send(request).await
    }

    /// List running tasks (indexing, compaction, replication)
    pub async fn get_active_tasks(&self, options: &GetActiveTasksOptions) -> Result<Vec<ActiveTask>> {
        let request = self.request(
            "getActiveTasks",
            Method::GET,
            "/_active_tasks",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Retrieve provisioned throughput capacity
    pub async fn get_capacity_throughput_information(
        &self,
        options: &GetCapacityThroughputInformationOptions,
    ) -> Result<CapacityThroughputInformation> {
        let request = self.request(
            "getCapacityThroughputInformation",
            Method::GET,
            "/_api/v2/user/capacity/throughput",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Change provisioned throughput capacity
    pub async fn put_capacity_throughput_configuration(
        &self,
        options: &PutCapacityThroughputConfigurationOptions,
    ) -> Result<CapacityThroughputInformation> {
        if options.blocks == 0 {
            return Err(Error::invalid_value("blocks", "must be at least 1"));
        }
        let request = self
            .request(
                "putCapacityThroughputConfiguration",
                Method::PUT,
                "/_api/v2/user/capacity/throughput",
                &[],
                &options.headers,
            )?
            .json(&json!({ "blocks": options.blocks }))?;
        self.send(request).await
    }

    /// Retrieve throughput used in the current second
    pub async fn get_current_throughput_information(
        &self,
        options: &GetCurrentThroughputInformationOptions,
    ) -> Result<CurrentThroughputInformation> {
        let request = self.request(
            "getCurrentThroughputInformation",
            Method::GET,
            "/_api/v2/user/current/throughput",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Retrieve the event types sent to Activity Tracker
    pub async fn get_activity_tracker_events(
        &self,
        options: &GetActivityTrackerEventsOptions,
    ) -> Result<ActivityTrackerEvents> {
        let request = self.request(
            "getActivityTrackerEvents",
            Method::GET,
            "/_api/v2/user/activity_tracker/events",
            &[],
            &options.headers,
        )?;
        self.send(request).await
    }

    /// Choose the event types sent to Activity Tracker
    pub async fn post_activity_tracker_events(
        &self,
        options: &PostActivityTrackerEventsOptions,
    ) -> Result<OkResult> {
        if options.types.is_empty() {
            return Err(Error::validation("types"));
        }
        for event_type in &options.types {
            require(&[("types", event_type)])?;
        }
        let request = self
            .request(
                "postActivityTrackerEvents",
                Method::POST,
                "/_api/v2/user/activity_tracker/events",
                &[],
                &options.headers,
            )?
            .json(&ActivityTrackerEvents {
                types: options.types.clone(),
            })?;
        self.send(request).await
    }
}
