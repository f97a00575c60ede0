use serializd_config::{Config, ResolutionStrategy};
use tracing::info;
use crate::error::SourceError;
use crate::resolvers::{SerializdCatalogResolver, TraktSearchResolver, TraktSlugResolver};
use crate::serializd::SerializdClient;
use crate::traits::EpisodeIdResolver;
use crate::trakt::TraktClient;

fn trakt_client(config: &Config) -> Result<TraktClient, SourceError> {
    let client_id = config
        .trakt
        .client_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| SourceError::Configuration("Trakt client id is required for this strategy".to_string()))?;
    Ok(TraktClient::new(&config.trakt, client_id))
}

/// Build the episode id resolver selected by `config.export.strategy`.
///
/// The catalog strategy reuses the (already logged-in) Serializd client.
pub fn create_resolver(config: &Config, serializd: &SerializdClient) -> Result<Box<dyn EpisodeIdResolver>, SourceError> {
    let resolver: Box<dyn EpisodeIdResolver> = match config.export.strategy {
        ResolutionStrategy::TraktSearch => Box::new(TraktSearchResolver::new(trakt_client(config)?)),
        ResolutionStrategy::TraktSlug => Box::new(TraktSlugResolver::new(trakt_client(config)?)),
        ResolutionStrategy::SerializdCatalog => {
            let data_version = config
                .serializd
                .data_version
                .clone()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    SourceError::Configuration("serializd.data_version is required for the serializd-catalog strategy".to_string())
                })?;
            Box::new(SerializdCatalogResolver::new(serializd.clone(), data_version))
        }
    };

    info!(strategy = resolver.strategy_name(), "Episode id resolver ready");
    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trakt_strategies_need_client_id() {
        let config = Config::default();
        let serializd = SerializdClient::new(&config.serializd);
        let err = create_resolver(&config, &serializd).err().unwrap();
        assert!(matches!(err, SourceError::Configuration(_)));
    }

    #[test]
    fn test_selects_strategy() {
        let mut config = Config::default();
        config.trakt.client_id = Some("key".to_string());
        let serializd = SerializdClient::new(&config.serializd);

        config.export.strategy = ResolutionStrategy::TraktSlug;
        assert_eq!(create_resolver(&config, &serializd).unwrap().strategy_name(), "trakt-slug");

        config.export.strategy = ResolutionStrategy::SerializdCatalog;
        assert!(create_resolver(&config, &serializd).is_err());
        config.serializd.data_version = Some("build".to_string());
        assert_eq!(create_resolver(&config, &serializd).unwrap().strategy_name(), "serializd-catalog");
    }
}
