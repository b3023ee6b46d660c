/// Result of a successful role switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSwitchOutcome {
    /// Whether the new role requires a verification step; the caller
    /// branches navigation on this, the session manager does not gate
    /// access.
    pub verification_required: bool,
}
