use crate::{Listing, ListingId, LoadFailure, LoadTicket, ShareOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The app finished starting up and can show the first page.
    Started,
    /// The viewport came within the scroll threshold of the bottom.
    NearBottom,
    /// User opened a listing card or a recently viewed entry.
    ListingViewed { id: ListingId },
    /// User clicked the save (heart) action on a card.
    SaveToggled { id: ListingId },
    /// User clicked the share action on a card.
    ShareRequested { id: ListingId },
    /// User submitted the search bar.
    SearchSubmitted { query: String, location: String },
    /// User clicked Refresh.
    RefreshClicked,
    /// User clicked Post.
    PostClicked,
    /// The source finished the load identified by `ticket`.
    PageLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Listing>, LoadFailure>,
    },
    /// The platform finished a share request.
    ShareFinished {
        id: ListingId,
        outcome: ShareOutcome,
    },
    /// Leaves the state untouched and produces no effects.
    NoOp,
}
