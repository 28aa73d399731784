//! Serialization and delivery of stream events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::airports::AirportDirectory;
use crate::domain::{FlightLeg, Itinerary};

use super::error::SearchError;
use super::events::{END_SENTINEL, LegView, NoFlightsEvent, ResultEvent};

/// Pushes serialized events into the response stream.
///
/// Each message on the channel is the payload of one `data:` frame. A closed
/// channel means the client went away; every send then fails with
/// [`SearchError::Disconnected`].
pub struct ResultEmitter {
    tx: mpsc::Sender<String>,
    airports: Arc<AirportDirectory>,
    total_passengers: u32,
    pace: Duration,
    emitted: usize,
    no_flights_sent: bool,
    end_sent: bool,
}

impl ResultEmitter {
    /// Create an emitter for one search run.
    pub fn new(
        tx: mpsc::Sender<String>,
        airports: Arc<AirportDirectory>,
        total_passengers: u32,
        pace: Duration,
    ) -> Self {
        Self {
            tx,
            airports,
            total_passengers,
            pace,
            emitted: 0,
            no_flights_sent: false,
            end_sent: false,
        }
    }

    /// Send one result, after the pacing delay if it isn't the first.
    pub async fn emit(&mut self, candidate: &Itinerary) -> Result<(), SearchError> {
        if self.emitted > 0 && !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }

        let event = self.render(candidate).await;
        let data = serde_json::to_string(&event)?;
        self.send(data).await?;
        self.emitted += 1;
        Ok(())
    }

    /// Send the no-flights notice. Later calls do nothing.
    pub async fn emit_no_flights(&mut self) -> Result<(), SearchError> {
        if self.no_flights_sent {
            return Ok(());
        }
        let data = serde_json::to_string(&NoFlightsEvent::default())?;
        self.send(data).await?;
        self.no_flights_sent = true;
        Ok(())
    }

    /// Send the end sentinel. Later calls do nothing.
    pub async fn emit_end(&mut self) -> Result<(), SearchError> {
        if self.end_sent {
            return Ok(());
        }
        self.send(END_SENTINEL.to_string()).await?;
        self.end_sent = true;
        Ok(())
    }

    /// Number of results sent so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether the client has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the client has gone away.
    pub async fn closed(&self) {
        self.tx.closed().await
    }

    async fn render(&self, candidate: &Itinerary) -> ResultEvent {
        let outbound = candidate.outbound();
        let outbound_mins = self.duration_mins(outbound).await;

        let inbound = match candidate.inbound() {
            Some(leg) => LegView::from_leg(leg, self.duration_mins(leg).await),
            None => LegView::mirrored(outbound, outbound_mins),
        };

        ResultEvent {
            outbound: LegView::from_leg(outbound, outbound_mins),
            inbound: Some(inbound),
            total_price: candidate.total_price(self.total_passengers),
        }
    }

    async fn duration_mins(&self, leg: &FlightLeg) -> i64 {
        self.airports
            .flight_duration(leg)
            .await
            .map(|d| d.num_minutes())
            .unwrap_or(0)
    }

    async fn send(&self, data: String) -> Result<(), SearchError> {
        self.tx
            .send(data)
            .await
            .map_err(|_| SearchError::Disconnected)
    }
}
