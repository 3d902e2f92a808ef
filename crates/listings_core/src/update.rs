use crate::{AppState, Effect, Msg, SearchQuery};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => state.start_initial_load(),
        Msg::NearBottom => state.start_more_load(),
        Msg::ListingViewed { id } => state.view_listing(&id),
        Msg::SaveToggled { id } => state.toggle_save(&id),
        Msg::ShareRequested { id } => state.share(&id),
        Msg::ShareFinished { outcome, .. } => state.share_finished(outcome),
        Msg::SearchSubmitted { query, location } => {
            let query = SearchQuery::new(&query, &location);
            let notice = format!(
                "Searching for \"{}\" in {}",
                query.query,
                query.location_label()
            );
            let mut effects = vec![Effect::Notify(notice)];
            effects.extend(state.restart_feed(Some(query)));
            effects
        }
        Msg::RefreshClicked => {
            // Refresh keeps the active search.
            let query = state.active_query().cloned();
            state.restart_feed(query)
        }
        Msg::PostClicked => vec![Effect::Notify("Posting feature coming soon!".to_string())],
        Msg::PageLoaded { ticket, result } => state.apply_page(ticket, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
