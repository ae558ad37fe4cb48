use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Who may wipe the shared canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Any member of the room, holder or not.
    #[default]
    AnyMember,
    /// Only the current token holder.
    HolderOnly,
}

/// What happens to the token when its holder leaves the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HolderLeavePolicy {
    /// Hand it to the member who joined after the holder, wrapping around.
    #[default]
    NextInJoinOrder,
    /// Leave the room unclaimed until somebody joins.
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomPolicy {
    pub clear: ClearPolicy,
    pub holder_leave: HolderLeavePolicy,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub policy: RoomPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            policy: RoomPolicy::default(),
        }
    }
}

impl FromStr for ClearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any-member" => Ok(Self::AnyMember),
            "holder-only" => Ok(Self::HolderOnly),
            other => Err(format!(
                "unknown clear policy '{}' (expected any-member or holder-only)",
                other
            )),
        }
    }
}

impl fmt::Display for ClearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyMember => f.write_str("any-member"),
            Self::HolderOnly => f.write_str("holder-only"),
        }
    }
}

impl FromStr for HolderLeavePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next-in-join-order" => Ok(Self::NextInJoinOrder),
            "release" => Ok(Self::Release),
            other => Err(format!(
                "unknown holder-leave policy '{}' (expected next-in-join-order or release)",
                other
            )),
        }
    }
}

impl fmt::Display for HolderLeavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextInJoinOrder => f.write_str("next-in-join-order"),
            Self::Release => f.write_str("release"),
        }
    }
}
