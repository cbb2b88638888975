#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Channel state transitions
// ============================================================================

#[test_case(ChannelState::NotIssued, ChannelState::Pending)]
#[test_case(ChannelState::NotIssued, ChannelState::Complete)]
#[test_case(ChannelState::NotIssued, ChannelState::Failed)]
#[test_case(ChannelState::Pending, ChannelState::Complete)]
fn ChannelState___valid_transitions___allowed(from: ChannelState, to: ChannelState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

#[test_case(ChannelState::Pending, ChannelState::Failed)]
#[test_case(ChannelState::Pending, ChannelState::NotIssued)]
#[test_case(ChannelState::Complete, ChannelState::Pending)]
#[test_case(ChannelState::Complete, ChannelState::Failed)]
#[test_case(ChannelState::Failed, ChannelState::Complete)]
#[test_case(ChannelState::Failed, ChannelState::Failed)]
#[test_case(ChannelState::NotIssued, ChannelState::NotIssued)]
fn ChannelState___invalid_transitions___not_allowed(from: ChannelState, to: ChannelState) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Which channel ends issue in which phase
// ============================================================================

#[test_case(HandshakePhase::Connect, Direction::Out, true)]
#[test_case(HandshakePhase::Connect, Direction::In, false)]
#[test_case(HandshakePhase::Connect, Direction::InOut, false)]
#[test_case(HandshakePhase::Open, Direction::In, true)]
#[test_case(HandshakePhase::Open, Direction::Out, true)]
#[test_case(HandshakePhase::Close, Direction::InOut, true)]
fn HandshakePhase___issues_for___by_direction(
    phase: HandshakePhase,
    direction: Direction,
    expected: bool,
) {
    assert_eq!(phase.issues_for(direction), expected);
}

#[test_case(HandshakePhase::Connect, "connect")]
#[test_case(HandshakePhase::Open, "open")]
#[test_case(HandshakePhase::Close, "close")]
fn HandshakePhase___display___is_verb(phase: HandshakePhase, expected: &str) {
    assert_eq!(phase.to_string(), expected);
}
