// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scripted in-process service stubs shared by the integration tests.
//!
//! Every stub completes its calls on a freshly spawned thread, the way a
//! transport delivers completions, and records the requests it saw.

#![allow(dead_code)]

use parking_lot::Mutex;
use quadlink::api::directory::{
    GetServiceEntryRequest, GetServiceEntryResponse, GetServiceEntryStatus, ListServiceEntriesRequest,
    ListServiceEntriesResponse, ServiceEntry,
};
use quadlink::api::docking::{
    DockingCommandFeedbackRequest, DockingCommandFeedbackResponse, DockingCommandRequest,
    DockingCommandResponse, DockingCommandStatus, DockingFeedbackStatus,
};
use quadlink::api::power::{
    PowerCommandFeedbackRequest, PowerCommandFeedbackResponse, PowerCommandRequest,
    PowerCommandResponse, PowerCommandStatus,
};
use quadlink::api::robot_command::{RobotCommandRequest, RobotCommandResponse, RobotCommandStatus};
use quadlink::api::robot_state::{
    MotorPowerState, PowerState, RobotState, RobotStateRequest, RobotStateResponse,
};
use quadlink::api::time_sync::{
    TimeSyncEstimate, TimeSyncState, TimeSyncStatus, TimeSyncUpdateRequest,
    TimeSyncUpdateResponse,
};
use quadlink::api::{CommonErrorCode, LeaseUseResult, ResponseHeader, WireDuration};
use quadlink::command::{DockingStub, PowerStub, RobotCommandStub, RobotStateStub};
use quadlink::directory::DirectoryStub;
use quadlink::rpc::{CallContext, ClientCore, Completion, TransportStatus};
use quadlink::time::system_clock;
use quadlink::time_sync::TimeSyncStub;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub fn core(name: &str) -> ClientCore {
    ClientCore::new(name, system_clock())
}

/// Complete `done` from another thread.
fn complete<Rsp: Send + 'static>(done: Completion<Rsp>, transport: TransportStatus, response: Rsp) {
    thread::spawn(move || done(transport, response));
}

/// Replays a fixed sequence; the last entry repeats once the rest is used.
pub struct Script<T: Clone> {
    items: Mutex<VecDeque<T>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(items: Vec<T>) -> Self {
        assert!(!items.is_empty(), "script needs at least one entry");
        Self {
            items: Mutex::new(items.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> T {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.lock();
        if items.len() > 1 {
            items.pop_front().unwrap()
        } else {
            items.front().cloned().unwrap()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub type Reply<S> = Result<S, TransportStatus>;

fn ok_header() -> Option<ResponseHeader> {
    Some(ResponseHeader::with_code(CommonErrorCode::Ok))
}

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

pub struct FakePower {
    pub command: Mutex<PowerCommandResponse>,
    pub feedback: Script<Reply<PowerCommandStatus>>,
    pub requests: Mutex<Vec<PowerCommandRequest>>,
    pub feedback_requests: Mutex<Vec<PowerCommandFeedbackRequest>>,
}

impl FakePower {
    pub fn new(
        command_id: u32,
        command_status: PowerCommandStatus,
        feedback: Vec<Reply<PowerCommandStatus>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            command: Mutex::new(PowerCommandResponse {
                header: ok_header(),
                status: command_status,
                power_command_id: command_id,
                ..Default::default()
            }),
            feedback: Script::new(feedback),
            requests: Mutex::new(Vec::new()),
            feedback_requests: Mutex::new(Vec::new()),
        })
    }

    /// Attach `result` to every command response.
    pub fn answer_lease(&self, result: LeaseUseResult) {
        self.command.lock().lease_use_result = Some(result);
    }
}

impl PowerStub for FakePower {
    fn power_command(
        &self,
        _ctx: CallContext,
        request: PowerCommandRequest,
        done: Completion<PowerCommandResponse>,
    ) {
        self.requests.lock().push(request);
        complete(done, TransportStatus::ok(), self.command.lock().clone());
    }

    fn power_command_feedback(
        &self,
        _ctx: CallContext,
        request: PowerCommandFeedbackRequest,
        done: Completion<PowerCommandFeedbackResponse>,
    ) {
        self.feedback_requests.lock().push(request);
        match self.feedback.next() {
            Ok(status) => complete(
                done,
                TransportStatus::ok(),
                PowerCommandFeedbackResponse {
                    header: ok_header(),
                    status,
                },
            ),
            Err(transport) => complete(done, transport, PowerCommandFeedbackResponse::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Robot command / robot state
// ---------------------------------------------------------------------------

pub struct FakeRobotCommand {
    pub status: RobotCommandStatus,
    pub message: String,
    pub requests: Mutex<Vec<RobotCommandRequest>>,
}

impl FakeRobotCommand {
    pub fn new(status: RobotCommandStatus) -> Arc<Self> {
        Arc::new(Self {
            status,
            message: String::new(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting(status: RobotCommandStatus, message: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            message: message.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

impl RobotCommandStub for FakeRobotCommand {
    fn robot_command(
        &self,
        _ctx: CallContext,
        request: RobotCommandRequest,
        done: Completion<RobotCommandResponse>,
    ) {
        self.requests.lock().push(request);
        complete(
            done,
            TransportStatus::ok(),
            RobotCommandResponse {
                header: ok_header(),
                status: self.status,
                message: self.message.clone(),
                robot_command_id: 11,
                ..Default::default()
            },
        );
    }
}

pub struct FakeRobotState {
    pub motors: Script<MotorPowerState>,
}

impl FakeRobotState {
    pub fn new(motors: Vec<MotorPowerState>) -> Arc<Self> {
        Arc::new(Self {
            motors: Script::new(motors),
        })
    }
}

impl RobotStateStub for FakeRobotState {
    fn get_robot_state(
        &self,
        _ctx: CallContext,
        _request: RobotStateRequest,
        done: Completion<RobotStateResponse>,
    ) {
        let motor_power_state = self.motors.next();
        complete(
            done,
            TransportStatus::ok(),
            RobotStateResponse {
                header: ok_header(),
                robot_state: Some(RobotState {
                    power_state: Some(PowerState {
                        motor_power_state,
                        ..Default::default()
                    }),
                }),
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Docking
// ---------------------------------------------------------------------------

pub struct FakeDocking {
    pub command: DockingCommandStatus,
    pub feedback: Script<DockingFeedbackStatus>,
    pub requests: Mutex<Vec<DockingCommandRequest>>,
    next_id: AtomicU32,
}

impl FakeDocking {
    pub fn new(command: DockingCommandStatus, feedback: Vec<DockingFeedbackStatus>) -> Arc<Self> {
        Arc::new(Self {
            command,
            feedback: Script::new(feedback),
            requests: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(100),
        })
    }
}

impl DockingStub for FakeDocking {
    fn docking_command(
        &self,
        _ctx: CallContext,
        request: DockingCommandRequest,
        done: Completion<DockingCommandResponse>,
    ) {
        self.requests.lock().push(request);
        complete(
            done,
            TransportStatus::ok(),
            DockingCommandResponse {
                header: ok_header(),
                status: self.command,
                docking_command_id: self.next_id.fetch_add(1, Ordering::SeqCst),
                ..Default::default()
            },
        );
    }

    fn docking_command_feedback(
        &self,
        _ctx: CallContext,
        _request: DockingCommandFeedbackRequest,
        done: Completion<DockingCommandFeedbackResponse>,
    ) {
        complete(
            done,
            TransportStatus::ok(),
            DockingCommandFeedbackResponse {
                header: ok_header(),
                status: self.feedback.next(),
                ..Default::default()
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Time sync
// ---------------------------------------------------------------------------

/// Time-sync service reporting `statuses` in order with a fixed skew.
pub struct FakeTimeSync {
    pub statuses: Script<TimeSyncStatus>,
    pub skew: WireDuration,
    pub requests: Mutex<Vec<TimeSyncUpdateRequest>>,
}

impl FakeTimeSync {
    pub const CLOCK_ID: &'static str = "robot-clock-1";

    pub fn new(statuses: Vec<TimeSyncStatus>, skew: WireDuration) -> Arc<Self> {
        Arc::new(Self {
            statuses: Script::new(statuses),
            skew,
            requests: Mutex::new(Vec::new()),
        })
    }
}

impl TimeSyncStub for FakeTimeSync {
    fn time_sync_update(
        &self,
        _ctx: CallContext,
        request: TimeSyncUpdateRequest,
        done: Completion<TimeSyncUpdateResponse>,
    ) {
        self.requests.lock().push(request);
        let clock = system_clock();
        let mut header = ResponseHeader::with_code(CommonErrorCode::Ok);
        header.request_received_timestamp = Some(clock.now_timestamp());
        header.response_timestamp = Some(clock.now_timestamp());
        let status = self.statuses.next();
        let established = status == TimeSyncStatus::Ok;
        complete(
            done,
            TransportStatus::ok(),
            TimeSyncUpdateResponse {
                header: Some(header),
                previous_estimate: None,
                state: Some(TimeSyncState {
                    best_estimate: established.then_some(TimeSyncEstimate {
                        clock_skew: Some(self.skew),
                        round_trip_time: Some(WireDuration::new(0, 1_000_000)),
                    }),
                    status,
                    measurement_time: None,
                }),
                clock_identifier: if established {
                    Self::CLOCK_ID.to_string()
                } else {
                    String::new()
                },
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

pub struct FakeDirectory {
    pub listings: Script<Reply<Vec<&'static str>>>,
}

impl FakeDirectory {
    pub fn new(listings: Vec<Reply<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self {
            listings: Script::new(listings),
        })
    }
}

impl DirectoryStub for FakeDirectory {
    fn list_service_entries(
        &self,
        _ctx: CallContext,
        _request: ListServiceEntriesRequest,
        done: Completion<ListServiceEntriesResponse>,
    ) {
        match self.listings.next() {
            Ok(names) => complete(
                done,
                TransportStatus::ok(),
                ListServiceEntriesResponse {
                    header: ok_header(),
                    service_entries: names.into_iter().map(ServiceEntry::new).collect(),
                },
            ),
            Err(transport) => complete(done, transport, ListServiceEntriesResponse::default()),
        }
    }

    fn get_service_entry(
        &self,
        _ctx: CallContext,
        request: GetServiceEntryRequest,
        done: Completion<GetServiceEntryResponse>,
    ) {
        let entry = ServiceEntry::new(request.service_name);
        complete(
            done,
            TransportStatus::ok(),
            GetServiceEntryResponse {
                header: ok_header(),
                status: GetServiceEntryStatus::Ok,
                service_entry: Some(entry),
            },
        );
    }
}
