//! The search engine: predicate, scoring, ordering and pagination in one call.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::candidate::Candidate;
use crate::config::EngineConfig;
use crate::entity::{EntityKind, SearchableEntity};
use crate::error::{Result, SearchError};
use crate::pagination::{Page, PageRequest};
use crate::query::matching::{CasePolicy, TermSet};
use crate::query::normalizer::QueryTerms;
use crate::query::predicate::{Predicate, PredicateBuilder};
use crate::request::SearchRequest;
use crate::scoring::{
    MatchCountScorer, RankedResult, ScoreExplanation, Scorer, SortValue, sort_ranked,
};
use crate::storage::{CandidateSource, RecordLoader};

/// Weighted multi-field search over an entity's candidates.
///
/// The engine is stateless between calls: it holds its configuration and scorer,
/// takes `&self`, and can be shared across threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: EngineConfig,
    scorer: Arc<dyn Scorer>,
}

impl SearchEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config
            .validate()
            .inspect_err(|err| warn!(%err, "rejected engine configuration"))?;
        Ok(SearchEngine {
            config,
            scorer: Arc::new(MatchCountScorer::new()),
        })
    }

    /// Replace the relevance scorer.
    pub fn with_scorer<S: Scorer + 'static>(mut self, scorer: S) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a search over `entity`.
    ///
    /// Candidates outside the request's tenant scope are removed first, then the
    /// filters and query terms are applied, the survivors are scored and ordered,
    /// and the requested page is sliced out. Ordering is total, so identical inputs
    /// always produce identical pages.
    ///
    /// The total and the page come from the same candidate read. A caller paging
    /// through results while records change may still see an item twice or miss
    /// one across pages.
    pub fn search(
        &self,
        entity: &SearchableEntity,
        request: &SearchRequest,
        source: &dyn CandidateSource,
    ) -> Result<Page<RankedResult>> {
        let policy = CasePolicy::from_case_sensitive(self.config.case_sensitive);
        let query = QueryTerms::parse(request.query.as_deref());
        let terms = TermSet::new(&query, policy);
        let term_count = terms.len();

        let predicate = PredicateBuilder::new(entity)
            .terms(terms)
            .match_mode(request.match_mode.unwrap_or(self.config.match_mode))
            .filters(&request.filters)
            .scope(&request.scope)
            .build()?;

        let candidates = source
            .candidates(entity, &request.scope)
            .map_err(SearchError::Storage)?;
        let parallel = candidates.len() >= self.config.parallel_threshold;
        trace!(
            entity = entity.name(),
            candidates = candidates.len(),
            parallel,
            "loaded candidates"
        );

        let mut ranked: Vec<RankedResult> = if parallel {
            candidates
                .par_iter()
                .filter_map(|c| self.rank(&predicate, c, request.explain))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|c| self.rank(&predicate, c, request.explain))
                .collect()
        };
        trace!(entity = entity.name(), matched = ranked.len(), "evaluated predicate");

        sort_ranked(&mut ranked, entity.sort().direction(), parallel);

        let page = PageRequest::resolve(request.page, request.page_size, &self.config)
            .apply(ranked);
        debug!(
            entity = entity.name(),
            terms = term_count,
            filters = request.filters.len(),
            scoped = !request.scope.is_global(),
            scorer = self.scorer.name(),
            total = page.total,
            page = page.page,
            returned = page.items.len(),
            "search completed"
        );

        Ok(page)
    }

    /// Run a search over one of the built-in entity kinds, named as in
    /// [`EntityKind::as_str`].
    pub fn search_kind(
        &self,
        kind: &str,
        request: &SearchRequest,
        source: &dyn CandidateSource,
    ) -> Result<Page<RankedResult>> {
        let entity = kind
            .parse::<EntityKind>()
            .inspect_err(|err| warn!(%err, "rejected entity kind"))?
            .definition()?;
        self.search(&entity, request, source)
    }

    /// Run a search and resolve the page into full records, in rank order.
    ///
    /// Identifiers the loader no longer resolves are dropped from the page; the
    /// total is left as counted by the search.
    pub fn search_records<T, L>(
        &self,
        entity: &SearchableEntity,
        request: &SearchRequest,
        source: &dyn CandidateSource,
        loader: &L,
    ) -> Result<Page<T>>
    where
        L: RecordLoader<T> + ?Sized,
    {
        let page = self.search(entity, request, source)?;
        let ids: Vec<_> = page.items.iter().map(|r| r.id).collect();
        let mut records = loader.load(entity, &ids).map_err(SearchError::Storage)?;

        let Page {
            items,
            page,
            page_size,
            total,
        } = page;
        let items: Vec<T> = items
            .into_iter()
            .filter_map(|r| {
                let record = records.remove(&r.id);
                if record.is_none() {
                    trace!(entity = entity.name(), id = r.id, "record vanished before load");
                }
                record
            })
            .collect();

        Ok(Page {
            items,
            page,
            page_size,
            total,
        })
    }

    fn rank(
        &self,
        predicate: &Predicate<'_>,
        candidate: &Candidate,
        explain: bool,
    ) -> Option<RankedResult> {
        let hits = predicate.evaluate(candidate)?;
        let entity = predicate.entity();
        let fields = entity.fields();

        let score = self.scorer.score(&hits, fields);
        let sort_key = SortValue::from_attribute(candidate.attribute(entity.sort().attribute()));
        let result = RankedResult::new(candidate.id(), score, sort_key);

        Some(if explain {
            result.with_explanation(ScoreExplanation::from_hits(
                predicate.terms(),
                &hits,
                fields,
                score,
            ))
        } else {
            result
        })
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine {
            config: EngineConfig::default(),
            scorer: Arc::new(MatchCountScorer::new()),
        }
    }
}
