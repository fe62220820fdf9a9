mod attraction;
mod favorite;

pub use attraction::{Attraction, AttractionId};
pub use favorite::FavoriteItem;

use chrono::{DateTime, Utc};

/// Convert DateTime<Utc> to Unix timestamp (seconds)
pub fn datetime_to_timestamp(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp()
}
