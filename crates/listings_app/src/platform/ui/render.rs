use std::collections::HashMap;
use std::io::{self, Write};

use listings_core::{AppViewModel, Listing, ListingCard, ListingId, RenderCommand, RenderMode};

/// Sink for everything the controller wants shown.
pub trait Presenter {
    fn render(&mut self, cards: &[ListingCard], mode: RenderMode) -> io::Result<()>;
    /// An empty slice must produce an explicit "no items" state.
    fn render_recently_viewed(&mut self, entries: &[Listing]) -> io::Result<()>;
    fn set_loading(&mut self, visible: bool) -> io::Result<()>;
    fn set_saved(&mut self, id: &str, saved: bool) -> io::Result<()>;
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

pub fn apply_render(presenter: &mut dyn Presenter, command: RenderCommand) -> io::Result<()> {
    match command {
        RenderCommand::Listings { mode, cards } => presenter.render(&cards, mode),
        RenderCommand::RecentlyViewed { entries } => presenter.render_recently_viewed(&entries),
        RenderCommand::LoadingIndicator { visible } => presenter.set_loading(visible),
        RenderCommand::SavedMarker { id, saved } => presenter.set_saved(&id, saved),
    }
}

/// Plain-text presenter; cards are numbered by grid position.
pub struct ConsolePresenter<W: Write> {
    out: W,
    positions: HashMap<ListingId, usize>,
    shown: usize,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            positions: HashMap::new(),
            shown: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn status(&mut self, view: &AppViewModel) -> io::Result<()> {
        let search = match &view.active_query {
            Some(query) => format!(" | search \"{}\" in {}", query.query, query.location_label()),
            None => String::new(),
        };
        writeln!(
            self.out,
            "Page {} | {} listings | {} saved{}{}",
            view.page,
            view.cards.len(),
            view.saved_count,
            if view.loading { " | loading" } else { "" },
            search
        )?;
        self.out.flush()
    }

    pub fn help(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render(&mut self, cards: &[ListingCard], mode: RenderMode) -> io::Result<()> {
        if mode == RenderMode::Replace {
            self.positions.clear();
            self.shown = 0;
            writeln!(self.out, "==== Listings ====")?;
        }
        for card in cards {
            self.shown += 1;
            self.positions.insert(card.listing.id.clone(), self.shown);
            let listing = &card.listing;
            writeln!(
                self.out,
                "[{}] {} {} | {}",
                self.shown,
                heart(card.saved),
                listing.title,
                listing.price
            )?;
            writeln!(
                self.out,
                "     {} | {} | {} | {}",
                listing.location, listing.category, listing.date, listing.id
            )?;
        }
        self.out.flush()
    }

    fn render_recently_viewed(&mut self, entries: &[Listing]) -> io::Result<()> {
        writeln!(self.out, "---- Recently viewed ----")?;
        if entries.is_empty() {
            writeln!(self.out, "  No recently viewed items")?;
        }
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.out, "  {}. {} ({})", index + 1, entry.title, entry.price)?;
        }
        self.out.flush()
    }

    fn set_loading(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            writeln!(self.out, "Loading listings...")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn set_saved(&mut self, id: &str, saved: bool) -> io::Result<()> {
        match self.positions.get(id) {
            Some(position) => writeln!(self.out, "[{}] {}", position, heart(saved))?,
            None => writeln!(self.out, "{} {}", id, heart(saved))?,
        }
        self.out.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, ">> {message}")?;
        self.out.flush()
    }
}

fn heart(saved: bool) -> &'static str {
    if saved {
        "♥"
    } else {
        "♡"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    fn card(id: &str, title: &str, saved: bool) -> ListingCard {
        ListingCard {
            listing: Listing {
                id: id.to_string(),
                title: title.to_string(),
                price: "$250".to_string(),
                location: "Brooklyn, NY".to_string(),
                category: "Electronics".to_string(),
                image: Url::parse("https://images.example/x.jpg").unwrap(),
                date: "2/3/2026".to_string(),
            },
            saved,
        }
    }

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn append_continues_numbering() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter
            .render(&[card("a", "Bike", false), card("b", "Sofa", true)], RenderMode::Replace)
            .unwrap();
        presenter
            .render(&[card("c", "Lamp", false)], RenderMode::Append)
            .unwrap();

        let text = output(presenter);
        assert!(text.contains("[1] ♡ Bike | $250"));
        assert!(text.contains("[2] ♥ Sofa | $250"));
        assert!(text.contains("[3] ♡ Lamp | $250"));
        assert_eq!(text.matches("==== Listings ====").count(), 1);
    }

    #[test]
    fn replace_restarts_numbering() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter
            .render(&[card("a", "Bike", false)], RenderMode::Replace)
            .unwrap();
        presenter
            .render(&[card("z", "Desk", false)], RenderMode::Replace)
            .unwrap();
        presenter.set_saved("z", true).unwrap();

        let text = output(presenter);
        assert!(text.contains("[1] ♡ Desk"));
        assert!(text.ends_with("[1] ♥\n"));
    }

    #[test]
    fn empty_recent_panel_says_so() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter.render_recently_viewed(&[]).unwrap();
        assert_eq!(
            output(presenter),
            "---- Recently viewed ----\n  No recently viewed items\n"
        );
    }

    #[test]
    fn recent_panel_lists_entries_in_order() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        let entries = vec![card("b", "Sofa", false).listing, card("a", "Bike", false).listing];
        presenter.render_recently_viewed(&entries).unwrap();

        let text = output(presenter);
        assert!(text.contains("  1. Sofa ($250)\n  2. Bike ($250)\n"));
        assert!(!text.contains("No recently viewed items"));
    }

    #[test]
    fn render_commands_dispatch_to_presenter() {
        let mut presenter = ConsolePresenter::new(Vec::new());
        apply_render(
            &mut presenter,
            RenderCommand::LoadingIndicator { visible: true },
        )
        .unwrap();
        apply_render(
            &mut presenter,
            RenderCommand::LoadingIndicator { visible: false },
        )
        .unwrap();
        presenter.notify("Added to saved").unwrap();

        assert_eq!(output(presenter), "Loading listings...\n>> Added to saved\n");
    }
}
