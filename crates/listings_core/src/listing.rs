use url::Url;

pub type ListingId = String;

/// A single classified-ad record. Price and date are display strings, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    pub image: Url,
    pub date: String,
}

impl Listing {
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}
