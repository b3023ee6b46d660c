use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Register a new account and make it active
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// FOUNDER, INVESTOR, BUILDER or LURKER
        #[arg(long)]
        role: String,
    },

    /// Log into an existing account and make it active
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign the active account out (it stays linked for switching)
    Logout {
        /// Also forget every linked account on this device
        #[arg(long)]
        everywhere: bool,
    },

    /// List the accounts linked on this device
    Accounts,

    /// Switch the active session to a linked account
    Switch {
        /// Account ID (see `accounts`)
        account_id: String,
    },

    /// Show the active account
    Whoami,

    /// Remove an account from the linked registry
    Unlink {
        /// Account ID (see `accounts`)
        account_id: String,
    },

    /// Update the active account's profile
    UpdateProfile {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        firm_name: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Comma-separated skills list
        #[arg(long)]
        skills: Option<String>,
    },

    /// Switch the active account's role
    SwitchRole {
        /// FOUNDER, INVESTOR, BUILDER or LURKER
        role: String,
    },
}
