/// Result of a successful register or login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Whether the caller must route the user into the verification
    /// flow (investor accounts). Forwarded from the server; the
    /// session manager does not enforce verification itself.
    pub verification_required: bool,
}
