//! Member service
//!
//! Household member directory: joining, lookup and payment handles.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::cache::TtlCache;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member to the household
    pub fn add(&self, name: &str, venmo_username: Option<&str>) -> HouseholdResult<Member> {
        let mut member = Member::new(name);
        member.venmo_username = clean_handle(venmo_username);

        member.validate().map_err(HouseholdError::Validation)?;

        self.storage.members.insert(member.clone())?;
        self.storage.members.save()?;

        self.storage.record_added(&member);

        Ok(member)
    }

    /// All members in rotation order
    pub fn list(&self) -> HouseholdResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    pub fn get(&self, id: MemberId) -> HouseholdResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by name or ID string
    pub fn find(&self, identifier: &str) -> HouseholdResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }

        Ok(self
            .storage
            .members
            .get_all()?
            .into_iter()
            .find(|m| m.id.matches(identifier)))
    }

    /// Set or clear a member's Venmo handle
    pub fn set_venmo(&self, identifier: &str, handle: Option<&str>) -> HouseholdResult<Member> {
        let before = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::member_not_found(identifier))?;

        let mut member = before.clone();
        member.venmo_username = clean_handle(handle);

        self.storage.members.update(member.clone())?;
        self.storage.members.save()?;

        self.storage.record_changed(&before, &member);

        Ok(member)
    }
}

/// Trim a payment handle, dropping a leading `@` and treating blanks as unset
fn clean_handle(handle: Option<&str>) -> Option<String> {
    handle
        .map(|h| h.trim().trim_start_matches('@').to_string())
        .filter(|h| !h.is_empty())
}

/// Cached view of the member list, used to canonicalize typed names
pub struct MemberDirectory<'a> {
    storage: &'a Storage,
    cache: TtlCache<Vec<Member>>,
}

impl<'a> MemberDirectory<'a> {
    pub fn new(storage: &'a Storage, ttl: Duration) -> Self {
        Self {
            storage,
            cache: TtlCache::new(ttl),
        }
    }

    /// Members as of `now`, reloaded from disk once the cache expires
    ///
    /// If the reload fails and an older list is cached, the older list is
    /// served; the error only surfaces when nothing was ever loaded.
    pub fn members(&mut self, now: DateTime<Utc>) -> HouseholdResult<&[Member]> {
        let storage = self.storage;
        let refreshed = self.cache.get_or_refresh(now, || {
            storage.members.load()?;
            storage.members.get_all()
        });

        if let Err(e) = refreshed.map(|_| ()) {
            if self.cache.get_stale().is_none() {
                return Err(e);
            }
            warn!(error = %e, "Member reload failed, using cached list");
        }

        Ok(self
            .cache
            .get_stale()
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// The stored spelling of `name`, or `None` if no member matches
    pub fn canonical_name(
        &mut self,
        now: DateTime<Utc>,
        name: &str,
    ) -> HouseholdResult<Option<String>> {
        Ok(self
            .members(now)?
            .iter()
            .find(|m| m.is_named(name))
            .map(|m| m.name.clone()))
    }

    /// Forget the cached list, e.g. after adding a member
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
