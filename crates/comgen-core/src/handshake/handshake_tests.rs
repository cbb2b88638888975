#![allow(non_snake_case)]

use super::*;

/// Channel that reports `issue_status` on issue and succeeds on poll number
/// `succeed_on_poll` (never when `None`).
struct ScriptedChannel {
    name: String,
    direction: Direction,
    issue_status: IssueStatus,
    succeed_on_poll: Option<u32>,
    issued: u32,
    polls: u32,
}

impl ScriptedChannel {
    fn new(name: &str, issue_status: IssueStatus, succeed_on_poll: Option<u32>) -> Self {
        Self {
            name: name.to_string(),
            direction: Direction::Out,
            issue_status,
            succeed_on_poll,
            issued: 0,
            polls: 0,
        }
    }

    fn receiving(mut self) -> Self {
        self.direction = Direction::In;
        self
    }
}

impl ChannelOperation for ScriptedChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn issue(&mut self, _phase: HandshakePhase) -> IssueStatus {
        self.issued += 1;
        self.issue_status
    }

    fn poll(&mut self, _phase: HandshakePhase, _timeout: u32) -> bool {
        self.polls += 1;
        self.succeed_on_poll == Some(self.polls)
    }
}

fn machine(phase: HandshakePhase) -> HandshakeMachine {
    HandshakeMachine::new(phase, 5, 1000)
}

#[test]
fn HandshakeMachine___success_on_third_poll___completes() {
    let mut channels = vec![ScriptedChannel::new("out1", IssueStatus::Pending, Some(3))];

    let outcome = machine(HandshakePhase::Open).run(&mut channels);

    assert!(outcome.is_success());
    assert_eq!(outcome.states, vec![ChannelState::Complete]);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(channels[0].polls, 3);
}

#[test]
fn HandshakeMachine___never_completes___fails_naming_channel() {
    let mut channels = vec![
        ScriptedChannel::new("fast", IssueStatus::Success, None),
        ScriptedChannel::new("stuck", IssueStatus::Pending, None),
    ];

    let outcome = machine(HandshakePhase::Open).run(&mut channels);

    assert!(!outcome.is_success());
    assert_eq!(outcome.attempts, 5);
    assert_eq!(channels[1].polls, 5);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics[0].message.contains("'stuck'"));
    assert!(outcome.diagnostics[0].is_fatal());
}

#[test]
fn HandshakeMachine___success_after_budget___still_fails() {
    let mut channels = vec![ScriptedChannel::new("late", IssueStatus::Pending, Some(6))];

    let outcome = machine(HandshakePhase::Close).run(&mut channels);

    assert!(!outcome.is_success());
    assert_eq!(outcome.states, vec![ChannelState::Pending]);
}

#[test]
fn HandshakeMachine___issue_failure___aborts_immediately() {
    let mut channels = vec![
        ScriptedChannel::new("first", IssueStatus::Pending, Some(1)),
        ScriptedChannel::new("broken", IssueStatus::Failed, None),
        ScriptedChannel::new("never_issued", IssueStatus::Success, None),
    ];

    let outcome = machine(HandshakePhase::Open).run(&mut channels);

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.states,
        vec![
            ChannelState::Pending,
            ChannelState::Failed,
            ChannelState::NotIssued
        ]
    );
    assert_eq!(outcome.attempts, 0);
    assert_eq!(channels[2].issued, 0);
    assert_eq!(channels[0].polls, 0);
    assert!(outcome.diagnostics[0].message.contains("'broken'"));
}

#[test]
fn HandshakeMachine___immediate_success___never_polls() {
    let mut channels = vec![ScriptedChannel::new("out1", IssueStatus::Success, None)];

    let outcome = machine(HandshakePhase::Open).run(&mut channels);

    assert!(outcome.is_success());
    assert_eq!(outcome.attempts, 0);
    assert_eq!(channels[0].polls, 0);
}

#[test]
fn HandshakeMachine___connect_receiver___starts_complete_without_issue() {
    let mut channels = vec![ScriptedChannel::new("in1", IssueStatus::Failed, None).receiving()];

    let outcome = machine(HandshakePhase::Connect).run(&mut channels);

    assert!(outcome.is_success());
    assert_eq!(channels[0].issued, 0);
}

#[test]
fn HandshakeMachine___open_receiver___issues() {
    let mut channels = vec![ScriptedChannel::new("in1", IssueStatus::Success, None).receiving()];

    let outcome = machine(HandshakePhase::Open).run(&mut channels);

    assert!(outcome.is_success());
    assert_eq!(channels[0].issued, 1);
}

#[test]
fn HandshakeMachine___no_channels___succeeds() {
    let mut channels: Vec<ScriptedChannel> = Vec::new();

    let outcome = machine(HandshakePhase::Connect).run(&mut channels);

    assert!(outcome.is_success());
    assert!(outcome.states.is_empty());
}

#[test]
fn HandshakeMachine___from_config___uses_retry_and_timeout() {
    let config = GeneratorConfig {
        retry_limit: 2,
        timeout: 50,
        ..GeneratorConfig::default()
    };

    let machine = HandshakeMachine::from_config(HandshakePhase::Close, &config);

    assert_eq!(machine.retry_limit, 2);
    assert_eq!(machine.timeout, 50);
}

#[test]
fn HandshakePhase___function_names___match_generated_code() {
    let names: Vec<&str> = HandshakePhase::ALL.iter().map(|p| p.function_name()).collect();

    assert_eq!(names, vec!["connectChannels", "openConnections", "closeConnections"]);
}

#[test]
fn ChannelState___default___not_issued() {
    assert_eq!(ChannelState::default(), ChannelState::NotIssued);
    assert!(!ChannelState::NotIssued.is_terminal());
    assert!(ChannelState::Failed.is_terminal());
}
