//! Collaboration resolution against the group directory.
//!
//! Every URN a batch needs is first looked up in the URN cache. When all
//! of them are cached, each distinct group is fetched from the directory by
//! its cached id. When any one is missing, the full directory listing is
//! fetched once, the cache is rebuilt from it, and the batch is resolved
//! from that listing. Either path fails the whole batch on the first
//! missing group; no partial results are returned.

use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

use crate::cache::{CacheError, UrnCache};
use crate::directory::mapping::to_group_record;
use crate::directory::{DirectoryError, GroupDirectory, ScimGroup};
use crate::model::{Collaboration, CollaborationRequest, GroupRecord, UrnCacheEntry};
use crate::ocsf;
use crate::urn::urn_from_suffix;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("group directory unavailable: {reason}")]
    DirectoryUnavailable { reason: String },

    #[error("no directory group for {urn}")]
    GroupNotFound { urn: String },

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub struct CollaborationResolver<D, C> {
    directory: D,
    cache: C,
    /// Serializes bulk refreshes so two listings never race on the cache.
    refresh_lock: Mutex<()>,
}

impl<D: GroupDirectory, C: UrnCache> CollaborationResolver<D, C> {
    pub fn new(directory: D, cache: C) -> Self {
        Self {
            directory,
            cache,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolve one `Collaboration` per request, in request order.
    pub async fn resolve(
        &self,
        requests: &[CollaborationRequest],
    ) -> Result<Vec<Collaboration>, ResolveError> {
        let urns = required_urns(requests);
        tracing::debug!(
            requests = requests.len(),
            urns = urns.len(),
            "Resolving collaborations"
        );

        let result = match self.cached_ids(&urns).await? {
            Some(cached) => self.fetch_cached(&cached).await,
            None => self.refresh_and_resolve(&urns).await,
        }
        .and_then(|records| assemble(requests, &records));

        if let Err(e) = &result {
            let urn = match e {
                ResolveError::GroupNotFound { urn } => Some(urn.as_str()),
                _ => None,
            };
            ocsf::resolution_failure_event(urn, &e.to_string());
        }
        result
    }

    /// `(urn, directory id)` for every URN, or `None` if any is uncached.
    async fn cached_ids(
        &self,
        urns: &[String],
    ) -> Result<Option<Vec<(String, String)>>, CacheError> {
        let mut cached = Vec::with_capacity(urns.len());
        for urn in urns {
            match self.cache.find(urn).await? {
                Some(id) => cached.push((urn.clone(), id)),
                None => {
                    tracing::info!(urn = %urn, "URN not cached, refreshing from directory listing");
                    return Ok(None);
                }
            }
        }
        Ok(Some(cached))
    }

    async fn fetch_cached(
        &self,
        cached: &[(String, String)],
    ) -> Result<HashMap<String, GroupRecord>, ResolveError> {
        let fetches: Vec<_> = cached
            .iter()
            .map(|(urn, id)| self.fetch_one(urn, id))
            .collect();

        let records = futures::future::try_join_all(fetches).await?;
        Ok(records.into_iter().collect())
    }

    async fn fetch_one(&self, urn: &str, id: &str) -> Result<(String, GroupRecord), ResolveError> {
        match self.directory.get_group(id).await? {
            Some(group) => Ok((urn.to_string(), to_group_record(urn, &group))),
            None => {
                tracing::warn!(urn, directory_id = id, "Cached group missing from directory");
                Err(ResolveError::GroupNotFound {
                    urn: urn.to_string(),
                })
            }
        }
    }

    async fn refresh_and_resolve(
        &self,
        urns: &[String],
    ) -> Result<HashMap<String, GroupRecord>, ResolveError> {
        let _guard = self.refresh_lock.lock().await;

        let listing = match self.directory.list_all_groups().await {
            Ok(Some(groups)) => groups,
            Ok(None) => {
                return Err(ResolveError::DirectoryUnavailable {
                    reason: "directory returned no group listing".into(),
                });
            }
            Err(e) => {
                return Err(ResolveError::DirectoryUnavailable {
                    reason: e.to_string(),
                });
            }
        };

        let listed = listing.len();
        let by_urn: HashMap<String, ScimGroup> = listing
            .into_iter()
            .filter_map(|group| {
                let urn = urn_from_suffix(group.urn_suffix()?);
                Some((urn, group))
            })
            .collect();

        // An empty listing signals a directory outage, not an empty directory
        if by_urn.is_empty() {
            tracing::warn!(listed, "Group listing carried no URNs; keeping cache");
            return Err(ResolveError::DirectoryUnavailable {
                reason: "directory returned an empty group listing".into(),
            });
        }

        let entries: Vec<UrnCacheEntry> = by_urn
            .iter()
            .map(|(urn, group)| UrnCacheEntry {
                urn: urn.clone(),
                directory_id: group.id.clone(),
            })
            .collect();
        self.cache.replace_all(&entries).await?;

        tracing::info!(listed, cached = entries.len(), "Rebuilt URN cache");
        ocsf::cache_refresh_event(entries.len(), listed - by_urn.len());

        urns.iter()
            .map(|urn| {
                let group = by_urn
                    .get(urn)
                    .ok_or_else(|| ResolveError::GroupNotFound { urn: urn.clone() })?;
                Ok::<_, ResolveError>((urn.clone(), to_group_record(urn, group)))
            })
            .collect()
    }
}

/// Distinct URNs needed by the batch, in first-seen order.
fn required_urns(requests: &[CollaborationRequest]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urns = Vec::new();
    for request in requests {
        for urn in std::iter::once(request.collaboration_urn()).chain(request.group_urns()) {
            if seen.insert(urn.clone()) {
                urns.push(urn);
            }
        }
    }
    urns
}

fn assemble(
    requests: &[CollaborationRequest],
    records: &HashMap<String, GroupRecord>,
) -> Result<Vec<Collaboration>, ResolveError> {
    let lookup = |urn: String| {
        records
            .get(&urn)
            .cloned()
            .ok_or(ResolveError::GroupNotFound { urn })
    };

    requests
        .iter()
        .map(|request| {
            Ok::<_, ResolveError>(Collaboration {
                organization: request.organization.clone(),
                collaboration_group: lookup(request.collaboration_urn())?,
                groups: request.group_urns().map(lookup).collect::<Result<_, _>>()?,
            })
        })
        .collect()
}
