// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! School name search.
//!
//! Substring hits always rank above fuzzy (subsequence) hits. Matching is case-insensitive.

use crate::model::SchoolId;
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Substring,
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    school: SchoolId,
    score: i64,
}

impl SearchHit {
    pub fn school(&self) -> &SchoolId {
        &self.school
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}

/// Ranked matches for `query`, best first; ties keep load order.
pub fn search_schools(store: &EntityStore, query: &str, mode: SearchMode) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = store
        .iter()
        .filter_map(|entity| {
            let haystack = entity.school().as_str().to_lowercase();
            let score = match mode {
                SearchMode::Substring => substring_score(&needle, &haystack),
                SearchMode::Fuzzy => substring_score(&needle, &haystack)
                    .map(|score| score + 1_000_000)
                    .or_else(|| fuzzy_score(&needle, &haystack)),
            }?;
            Some(SearchHit { school: entity.school().clone(), score })
        })
        .collect::<Vec<_>>();
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

fn substring_score(needle: &str, haystack: &str) -> Option<i64> {
    let first = haystack.find(needle)?;
    let starts = first == 0;
    let start_boundary =
        starts || haystack[..first].chars().last().is_some_and(is_boundary_char);

    let mut score = 200_000i64.saturating_sub((first as i64) * 1000);
    score -= haystack.chars().count() as i64;
    if starts {
        score += 50_000;
    }
    if start_boundary {
        score += 20_000;
    }
    if haystack == needle {
        score += 100_000;
    }
    Some(score)
}

struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    Some(score)
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut needle_iter = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last = 0;
    let mut prev_match: Option<usize> = None;
    let mut consecutive = 0;
    let mut start_boundary = false;
    let mut prev_hay: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_iter.peek() else {
            break;
        };
        if ch == want {
            needle_iter.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_hay.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }
        prev_hay = Some(ch);
    }

    if needle_iter.peek().is_some() {
        return None;
    }
    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '&' | '.' | '\'')
}

#[cfg(test)]
mod tests {
    use super::{search_schools, SearchMode};
    use crate::model::fixtures::small_store;

    fn names(query: &str, mode: SearchMode) -> Vec<String> {
        search_schools(&small_store(), query, mode)
            .into_iter()
            .map(|hit| hit.school().to_string())
            .collect()
    }

    #[test]
    fn substring_search_is_case_insensitive_and_prefers_prefixes() {
        assert_eq!(names("georgia", SearchMode::Substring), vec!["Georgia Tech"]);
        assert_eq!(names("a", SearchMode::Substring).first().map(String::as_str), Some("Alabama"));
        assert!(names("zzz", SearchMode::Substring).is_empty());
    }

    #[test]
    fn fuzzy_search_matches_subsequences() {
        assert_eq!(names("ndme", SearchMode::Fuzzy), vec!["Notre Dame"]);
        assert_eq!(names("gtech", SearchMode::Fuzzy), vec!["Georgia Tech"]);
    }

    #[test]
    fn fuzzy_search_ranks_substring_hits_first() {
        let hits = names("ala", SearchMode::Fuzzy);
        assert_eq!(hits.first().map(String::as_str), Some("Alabama"));
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(names("   ", SearchMode::Fuzzy).is_empty());
    }
}
