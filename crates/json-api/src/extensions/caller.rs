//! Authenticated caller stored in the request depot.

use salvo::prelude::{Depot, StatusError};
use unicart_app::auth::Caller;

const CALLER_DEPOT_KEY: &str = "caller";

pub(crate) trait CallerExt {
    fn insert_caller(&mut self, caller: Caller);

    /// The authenticated caller, or 401 when the auth hoop did not run.
    fn caller_or_401(&self) -> Result<&Caller, StatusError>;

    /// The authenticated caller if they are an administrator; 403 otherwise.
    fn administrator_or_403(&self) -> Result<&Caller, StatusError>;
}

impl CallerExt for Depot {
    fn insert_caller(&mut self, caller: Caller) {
        self.insert(CALLER_DEPOT_KEY, caller);
    }

    fn caller_or_401(&self) -> Result<&Caller, StatusError> {
        self.get::<Caller>(CALLER_DEPOT_KEY)
            .map_err(|_missing| StatusError::unauthorized())
    }

    fn administrator_or_403(&self) -> Result<&Caller, StatusError> {
        let caller = self.caller_or_401()?;

        if !caller.is_administrator() {
            return Err(StatusError::forbidden()
                .brief("You do not have permission to perform this action."));
        }

        Ok(caller)
    }
}
