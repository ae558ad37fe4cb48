use crate::config::{ClearPolicy, HolderLeavePolicy, RoomPolicy};
use baton_core::{PeerId, ServerEvent, StrokePoint};
use tracing::debug;

/// A single event addressed to a single member.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: PeerId,
    pub event: ServerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Unclaimed,
    Claimed(PeerId),
}

/// Membership and draw token of one room.
///
/// Every method is a synchronous transition that returns the deliveries it
/// produces; nothing here touches the network. `members` is kept in join
/// order, which is what the hand-off rules walk.
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    policy: RoomPolicy,
    members: Vec<PeerId>,
    active_drawer: Option<PeerId>,
}

impl RoomState {
    pub fn new(policy: RoomPolicy) -> Self {
        Self {
            policy,
            members: Vec::new(),
            active_drawer: None,
        }
    }

    pub fn members(&self) -> &[PeerId] {
        &self.members
    }

    pub fn active_drawer(&self) -> Option<&PeerId> {
        self.active_drawer.as_ref()
    }

    pub fn is_member(&self, peer_id: &PeerId) -> bool {
        self.members.contains(peer_id)
    }

    pub fn is_idle(&self) -> bool {
        self.members.is_empty()
    }

    pub fn phase(&self) -> TurnPhase {
        match (&self.active_drawer, self.members.is_empty()) {
            (Some(holder), _) => TurnPhase::Claimed(holder.clone()),
            (None, true) => TurnPhase::Idle,
            (None, false) => TurnPhase::Unclaimed,
        }
    }

    fn holds_token(&self, peer_id: &PeerId) -> bool {
        self.active_drawer.as_ref() == Some(peer_id)
    }

    pub fn join(&mut self, peer_id: PeerId) -> Vec<Delivery> {
        if !self.is_member(&peer_id) {
            self.members.push(peer_id.clone());
        }

        if self.active_drawer.is_none() {
            self.active_drawer = Some(peer_id);
        }

        self.broadcast_turn()
    }

    pub fn leave(&mut self, peer_id: &PeerId) -> Vec<Delivery> {
        let Some(index) = self.members.iter().position(|m| m == peer_id) else {
            debug!("Ignoring leave from non-member {}", peer_id);
            return Vec::new();
        };

        if self.holds_token(peer_id) {
            self.active_drawer = match self.policy.holder_leave {
                HolderLeavePolicy::NextInJoinOrder => self.successor(peer_id),
                HolderLeavePolicy::Release => None,
            };
        }
        self.members.remove(index);

        self.broadcast_turn()
    }

    pub fn pass_turn(&mut self, peer_id: &PeerId) -> Vec<Delivery> {
        if !self.holds_token(peer_id) {
            debug!("Ignoring pass-turn from non-holder {}", peer_id);
            return Vec::new();
        }

        // A sole member keeps the token.
        if let Some(next) = self.successor(peer_id) {
            self.active_drawer = Some(next);
        }

        self.broadcast_turn()
    }

    pub fn start_stroke(&self, peer_id: &PeerId, point: StrokePoint) -> Vec<Delivery> {
        if !self.holds_token(peer_id) {
            debug!("Dropping start-drawing from non-holder {}", peer_id);
            return Vec::new();
        }
        self.relay_from(peer_id, ServerEvent::ServerStartDrawing(point))
    }

    pub fn stroke_point(&self, peer_id: &PeerId, point: StrokePoint) -> Vec<Delivery> {
        if !self.holds_token(peer_id) {
            debug!("Dropping drawing from non-holder {}", peer_id);
            return Vec::new();
        }
        self.relay_from(peer_id, ServerEvent::ServerDrawing(point))
    }

    /// Relayed from any member. A stray finish in the middle of the holder's
    /// stroke lifts the spectators' pens, so their next point renders as a dot.
    pub fn finish_stroke(&self, peer_id: &PeerId) -> Vec<Delivery> {
        if !self.is_member(peer_id) {
            debug!("Dropping finish-drawing from non-member {}", peer_id);
            return Vec::new();
        }
        self.relay_from(peer_id, ServerEvent::ServerFinishDrawing)
    }

    pub fn clear(&self, peer_id: &PeerId) -> Vec<Delivery> {
        let allowed = match self.policy.clear {
            ClearPolicy::AnyMember => self.is_member(peer_id),
            ClearPolicy::HolderOnly => self.holds_token(peer_id),
        };
        if !allowed {
            debug!("Dropping clear-canvas from {}", peer_id);
            return Vec::new();
        }

        self.members
            .iter()
            .map(|member| Delivery {
                to: member.clone(),
                event: ServerEvent::ServerClearCanvas,
            })
            .collect()
    }

    /// The member that joined after `peer_id`, wrapping to the earliest one.
    fn successor(&self, peer_id: &PeerId) -> Option<PeerId> {
        let index = self.members.iter().position(|m| m == peer_id)?;
        let count = self.members.len();
        if count < 2 {
            return None;
        }
        Some(self.members[(index + 1) % count].clone())
    }

    fn broadcast_turn(&self) -> Vec<Delivery> {
        debug_assert!(
            self.active_drawer
                .as_ref()
                .is_none_or(|holder| self.members.contains(holder)),
            "active drawer must be a member"
        );

        self.members
            .iter()
            .map(|member| Delivery {
                to: member.clone(),
                event: ServerEvent::TurnUpdate(self.active_drawer.clone()),
            })
            .collect()
    }

    fn relay_from(&self, sender: &PeerId, event: ServerEvent) -> Vec<Delivery> {
        self.members
            .iter()
            .filter(|member| *member != sender)
            .map(|member| Delivery {
                to: member.clone(),
                event: event.clone(),
            })
            .collect()
    }
}
