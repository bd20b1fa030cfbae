// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

use crate::{Decision, Oracle};

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The caching wrapper every probe goes through.
///
/// Caches the backend's verdict by exact candidate string, so each unique
/// candidate is decided at most once per run. The cache grows unbounded for
/// the duration of the run; that is intentional, and sound because the
/// backend is a pure predicate over its input.
pub struct CachingOracle {
    backend: Box<dyn Oracle>,
    cache: HashMap<String, bool>,
    parse_calls: u64,
    real_calls: u64,
    time_spent: Duration,
}

impl CachingOracle {
    /// Wraps `backend` with an empty cache.
    pub fn new(backend: impl Oracle + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: HashMap::new(),
            parse_calls: 0,
            real_calls: 0,
            time_spent: Duration::ZERO,
        }
    }

    /// Probes the oracle with `candidate`, consulting the cache first.
    pub fn accepts(&mut self, candidate: &str) -> bool {
        self.parse_calls += 1;
        if let Some(&verdict) = self.cache.get(candidate) {
            return verdict;
        }
        self.real_calls += 1;
        let started = Instant::now();
        let accepted = self.backend.decide(candidate) == Decision::Accept;
        self.time_spent += started.elapsed();
        tracing::trace!(candidate, accepted, "oracle probe");
        self.cache.insert(candidate.to_string(), accepted);
        accepted
    }

    /// Total probes made by the pipeline, including cache hits.
    pub fn parse_calls(&self) -> u64 {
        self.parse_calls
    }

    /// Probes that actually reached the backend.
    pub fn real_calls(&self) -> u64 {
        self.real_calls
    }

    /// Wall-clock time spent inside the backend.
    pub fn time_spent(&self) -> Duration {
        self.time_spent
    }
}

impl std::fmt::Debug for CachingOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingOracle")
            .field("cached", &self.cache.len())
            .field("parse_calls", &self.parse_calls)
            .field("real_calls", &self.real_calls)
            .field("time_spent", &self.time_spent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_probes_hit_the_cache() {
        let mut oracle = CachingOracle::new(|candidate: &str| candidate.len() % 2 == 0);
        assert!(oracle.accepts("ab"));
        assert!(!oracle.accepts("abc"));
        assert!(oracle.accepts("ab"));
        assert!(oracle.accepts("ab"));
        assert_eq!(oracle.parse_calls(), 4);
        assert_eq!(oracle.real_calls(), 2);
    }

    #[test]
    fn backend_sees_each_candidate_once() {
        let mut hits = 0u32;
        let mut oracle = CachingOracle::new(move |_: &str| {
            hits += 1;
            true
        });
        assert!(oracle.accepts("x"));
        assert!(oracle.accepts("x"));
        assert_eq!(oracle.real_calls(), 1);
    }
}
