//! Date × origin search driver.
//!
//! Walks the candidate dates in ascending order and, for each date, the
//! origins in caller order. Every (date, origin) pair is one query to the
//! fare source; its survivors form a batch that is price-sorted and emitted
//! before the next pair is looked at. Ordering is therefore batch-local, not
//! global: the first results reach the client as soon as they are found.

use chrono::{Days, NaiveDate};
use futures::future::join_all;
use tracing::{debug, info, trace, warn};

use crate::domain::{AirportCode, Itinerary, SearchRequest};

use super::calendar;
use super::config::SearchConfig;
use super::dates::DateAxis;
use super::dedup::Deduplicator;
use super::emitter::ResultEmitter;
use super::error::SearchError;
use super::filter::FilterPipeline;
use super::source::{DateWindow, FareQuery, FareSource};

/// Counters describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidate dates that were searched.
    pub dates: usize,
    /// Queries issued to the fare source.
    pub queries: usize,
    /// Queries that failed and were skipped.
    pub failed_queries: usize,
    /// Results sent to the client.
    pub emitted: usize,
}

/// Drives one search request to completion.
pub struct Orchestrator<'a, S: FareSource> {
    source: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: FareSource> Orchestrator<'a, S> {
    /// Create a new orchestrator.
    pub fn new(source: &'a S, config: &'a SearchConfig) -> Self {
        Self { source, config }
    }

    /// Search every (date, origin) pair and stream survivors.
    ///
    /// Always finishes with the end sentinel, preceded by the no-flights
    /// notice when nothing was emitted. Stops early with
    /// [`SearchError::Disconnected`] once the client goes away; no further
    /// queries are issued after that.
    pub async fn run(
        &self,
        request: &SearchRequest,
        emitter: &mut ResultEmitter,
    ) -> Result<RunSummary, SearchError> {
        request.validate()?;

        let total_passengers = request.passengers.total();
        let filter = FilterPipeline::new(request, total_passengers);
        let mut dedup = Deduplicator::new();
        let mut summary = RunSummary::default();
        let weekend = request.trip_type.weekend_mode();

        info!(
            trip_type = %request.trip_type,
            start = %request.start,
            end = %request.end,
            origins = request.origins.len(),
            passengers = total_passengers,
            max_price = request.max_price,
            "Starting fare search"
        );

        let axis = DateAxis::new(
            request.start,
            request.end,
            request.trip_type,
            request.stay.min_days,
        );
        match axis.last_date() {
            Some(last) => debug!(first = %request.start, %last, "Candidate dates"),
            None => debug!("No candidate date fits the stay window"),
        }

        for date in axis {
            if let Some(mode) = weekend
                && !calendar::is_valid_outbound_day(date, mode)
            {
                trace!(%date, "Date outside weekend pattern, not querying");
                continue;
            }
            summary.dates += 1;

            let queries: Vec<FareQuery> = request
                .origins
                .iter()
                .filter_map(|origin| fare_query(request, *origin, date))
                .collect();

            for batch in queries.chunks(self.config.origin_batch()) {
                if emitter.is_closed() {
                    return Err(SearchError::Disconnected);
                }

                let in_flight: Vec<_> = batch.iter().map(|q| self.source.query(q)).collect();
                let results = tokio::select! {
                    results = join_all(in_flight) => results,
                    () = emitter.closed() => {
                        debug!(%date, "Client went away during fare query");
                        return Err(SearchError::Disconnected);
                    }
                };

                for (query, result) in batch.iter().zip(results) {
                    summary.queries += 1;

                    let raw = match result {
                        Ok(raw) => raw,
                        Err(e) => {
                            summary.failed_queries += 1;
                            warn!(origin = %query.origin, %date, error = %e, "Fare query failed, skipping");
                            continue;
                        }
                    };

                    if raw.is_empty() {
                        debug!(origin = %query.origin, %date, "No fares returned");
                        continue;
                    }

                    let raw_count = raw.len();
                    let survivors = select_batch(raw, &filter, &mut dedup, total_passengers);
                    debug!(
                        origin = %query.origin,
                        %date,
                        raw = raw_count,
                        survivors = survivors.len(),
                        "Filtered fares"
                    );

                    for candidate in &survivors {
                        emitter.emit(candidate).await?;
                    }
                }
            }
        }

        if !dedup.is_empty() {
            debug!(distinct = dedup.len(), "One-way flights seen across windows");
        }

        if emitter.emitted() == 0 {
            emitter.emit_no_flights().await?;
        }
        emitter.emit_end().await?;

        summary.emitted = emitter.emitted();
        info!(
            dates = summary.dates,
            queries = summary.queries,
            failed = summary.failed_queries,
            emitted = summary.emitted,
            "Fare search complete"
        );

        Ok(summary)
    }
}

/// Build the query for one (date, origin) pair.
///
/// One-way queries cover `[date, date + 1]`, so consecutive dates overlap.
/// Return-family queries pin the outbound to `date` and let the inbound fall
/// in `[date + min_days, min(end, date + max_days)]`; `None` when that
/// window is empty.
pub fn fare_query(request: &SearchRequest, origin: AirportCode, date: NaiveDate) -> Option<FareQuery> {
    let passengers = request.passengers;

    if !request.trip_type.is_return_family() {
        let outbound = DateWindow {
            from: date,
            to: date.succ_opt().unwrap_or(date),
        };
        return Some(FareQuery {
            origin,
            outbound,
            inbound: None,
            passengers,
        });
    }

    let earliest = date.checked_add_days(Days::new(u64::from(request.stay.min_days)))?;
    let latest = date
        .checked_add_days(Days::new(u64::from(request.stay.max_days)))?
        .min(request.end);

    let Some(inbound) = DateWindow::new(earliest, latest) else {
        debug!(%origin, %date, "Empty inbound window, not querying");
        return None;
    };

    Some(FareQuery {
        origin,
        outbound: DateWindow::day(date),
        inbound: Some(inbound),
        passengers,
    })
}

/// Filter, deduplicate and price-sort one (date, origin) batch.
///
/// The sort is stable: equal prices keep upstream order.
pub fn select_batch(
    raw: Vec<Itinerary>,
    filter: &FilterPipeline<'_>,
    dedup: &mut Deduplicator,
    total_passengers: u32,
) -> Vec<Itinerary> {
    let mut survivors: Vec<Itinerary> = raw
        .into_iter()
        .filter(|candidate| match filter.check(candidate) {
            Ok(()) => true,
            Err(reason) => {
                trace!(
                    destination = %candidate.outbound().destination,
                    price = candidate.per_person_price(),
                    %reason,
                    "Rejected fare"
                );
                false
            }
        })
        .filter(|candidate| dedup.admit(candidate))
        .collect();

    survivors.sort_by(|a, b| {
        a.total_price(total_passengers)
            .total_cmp(&b.total_price(total_passengers))
    });
    survivors
}
