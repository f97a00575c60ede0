pub mod error;
pub mod factory;
pub mod resolvers;
pub mod serializd;
pub mod slug;
pub mod traits;
pub mod trakt;

pub use error::SourceError;
pub use factory::create_resolver;
pub use resolvers::{SerializdCatalogResolver, TraktSearchResolver, TraktSlugResolver};
pub use serializd::SerializdClient;
pub use slug::slugify;
pub use traits::{EpisodeIdResolver, LibrarySource, ShowKey};
pub use trakt::TraktClient;
