use thiserror::Error;

use crate::router::{Screen, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("`{action}` is not available from the {from:?} screen")]
    NotAvailable { action: &'static str, from: Screen },

    #[error("the {variant:?} variant has no {screen:?} screen")]
    ScreenMissing { variant: Variant, screen: Screen },

    #[error("auto-return ticket {0} is no longer live")]
    StaleTicket(u64),
}
