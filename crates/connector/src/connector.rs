//! Connector - one exchange, one session
//!
//! Every request is one round trip: send, then wait for the response
//! carrying its correlation id. The wait is bounded by a total deadline;
//! each tick blocks on the session for at most one poll interval.
//!
//! ```text
//! Idle -> RequestSent -> Polling -> Complete
//!                                -> ExchangeError
//!                                -> TimedOut
//!      -> SessionUnavailable (send failed)
//! ```
//!
//! Instruments take one round trip (pages arrive as several lists).
//! Historical candles take one round trip per batch, walking the requested
//! range the way the exchange's profile says it pages.

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use meridian_core::{Candle, ExchangeId, Instrument, Timeframe};
use meridian_ports::{CandleQuery, Event, Message, Request, Session};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{CandlePaging, ExchangeProfile};
use crate::error::{ConnectorError, ConnectorResult, NormalizeError};
use crate::normalize::Normalizer;

/// Deadline and tick length for one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl PollTiming {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

impl Default for PollTiming {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_millis(100))
    }
}

/// How a fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The exchange returned its full list
    Complete,
    /// Deadline elapsed before a terminal message arrived
    TimedOut,
    /// The exchange answered with an error
    ExchangeError(String),
    /// The request could not be sent
    SessionUnavailable(String),
}

impl FetchStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, FetchStatus::Complete)
    }
}

/// Candles of one instrument together with the outcome of the last batch
#[derive(Debug, Clone)]
pub struct CandlesResult {
    pub exchange: ExchangeId,
    pub instrument: String,
    pub timeframe: Timeframe,
    /// Ascending by timestamp, one per timestamp, inside the requested range
    pub candles: Vec<Candle>,
    pub status: FetchStatus,
    /// Requests sent for this range
    pub batches: u32,
    pub elapsed: Duration,
    pub fetched_at: DateTime<Utc>,
}

/// Instruments together with the outcome that produced them
#[derive(Debug, Clone)]
pub struct InstrumentsResult {
    pub exchange: ExchangeId,
    /// Accumulated instruments; partial unless `status` is `Complete`
    pub instruments: Vec<Instrument>,
    pub status: FetchStatus,
    pub elapsed: Duration,
    pub fetched_at: DateTime<Utc>,
}

/// Connector for a single exchange
pub struct Connector {
    exchange: ExchangeId,
    profile: ExchangeProfile,
    session: Arc<dyn Session>,
    timing: PollTiming,
    // Held for the whole fetch: one request in flight per connector
    in_flight: Mutex<()>,
}

impl Connector {
    pub fn new(profile: ExchangeProfile, session: Arc<dyn Session>, timing: PollTiming) -> Self {
        Self {
            exchange: profile.exchange_id(),
            profile,
            session,
            timing,
            in_flight: Mutex::new(()),
        }
    }

    pub fn exchange(&self) -> &ExchangeId {
        &self.exchange
    }

    pub fn profile(&self) -> &ExchangeProfile {
        &self.profile
    }

    pub fn timing(&self) -> PollTiming {
        self.timing
    }

    pub fn session_name(&self) -> &str {
        self.session.name()
    }

    /// Instruments listed by the exchange.
    ///
    /// Exchange errors and timeouts yield whatever was accumulated
    /// (usually nothing); use [`Connector::fetch_instruments`] to tell them
    /// apart from an empty catalog.
    pub fn get_instruments(&self) -> ConnectorResult<Vec<Instrument>> {
        self.fetch_instruments().map(|result| result.instruments)
    }

    /// Request the instrument list and wait for the answer
    pub fn fetch_instruments(&self) -> ConnectorResult<InstrumentsResult> {
        let _guard = self.in_flight.lock();
        let started = Instant::now();

        let normalizer = Normalizer::new(&self.profile);
        let mut instruments = Vec::new();
        let request = Request::get_instruments(self.exchange.clone());

        let status = self.round_trip(request, |message| {
            let Message::InstrumentList(list) = message else {
                return Ok(false);
            };
            for element in &list.elements {
                let instrument = normalizer
                    .normalize(element)
                    .map_err(|source| self.normalize_error(source))?;
                instruments.push(instrument);
            }
            Ok(!list.has_more)
        })?;

        Ok(InstrumentsResult {
            exchange: self.exchange.clone(),
            instruments,
            status,
            elapsed: started.elapsed(),
            fetched_at: Utc::now(),
        })
    }

    /// Candles of `instrument` opened within `[from_ms, to_ms]`.
    ///
    /// A missing bound is left to the exchange. Exchange errors and
    /// timeouts end the walk early with what was gathered so far.
    pub fn get_historical_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        from_ms: Option<u64>,
        to_ms: Option<u64>,
    ) -> ConnectorResult<Vec<Candle>> {
        self.fetch_candles(instrument, timeframe, from_ms, to_ms)
            .map(|result| result.candles)
    }

    /// Walk the candle history of `instrument` in batches
    pub fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        from_ms: Option<u64>,
        to_ms: Option<u64>,
    ) -> ConnectorResult<CandlesResult> {
        let settings = self
            .profile
            .candles
            .ok_or_else(|| ConnectorError::CandlesUnsupported(self.exchange.to_string()))?;

        let _guard = self.in_flight.lock();
        let started = Instant::now();

        let query = CandleQuery::new(instrument, timeframe, settings.batch_limit);
        let mut candles = Vec::new();
        let mut status = FetchStatus::Complete;
        let mut batches = 0;

        match settings.paging {
            CandlePaging::Single => {
                let (outcome, batch) =
                    self.candle_batch(query.starting_at(from_ms).ending_at(to_ms))?;
                batches = 1;
                status = outcome;
                candles = batch;
            }
            CandlePaging::Forward => {
                let mut cursor = from_ms;
                while batches < settings.max_batches {
                    let (outcome, batch) =
                        self.candle_batch(query.clone().starting_at(cursor).ending_at(to_ms))?;
                    batches += 1;
                    status = outcome;

                    let newest = batch.iter().map(|c| c.timestamp).max();
                    candles.extend(batch);
                    if !status.is_complete() {
                        break;
                    }
                    let Some(newest) = newest else {
                        break;
                    };
                    // An exchange repeating itself would never reach the end
                    if cursor.is_some_and(|c| newest < c) {
                        break;
                    }
                    let next = newest + timeframe.millis();
                    if to_ms.is_some_and(|to| next > to) {
                        break;
                    }
                    cursor = Some(next);
                    self.warn_batch_cap(batches, settings.max_batches, instrument, timeframe);
                }
            }
            CandlePaging::Backward => {
                let mut end = to_ms.unwrap_or_else(now_ms);
                while batches < settings.max_batches {
                    let (outcome, batch) = self.candle_batch(query.clone().ending_at(Some(end)))?;
                    batches += 1;
                    status = outcome;

                    let oldest = batch.iter().map(|c| c.timestamp).min();
                    candles.extend(batch);
                    if !status.is_complete() {
                        break;
                    }
                    let Some(oldest) = oldest else {
                        break;
                    };
                    if oldest >= end || from_ms.is_some_and(|from| oldest <= from) {
                        break;
                    }
                    end = oldest;
                    self.warn_batch_cap(batches, settings.max_batches, instrument, timeframe);
                }
            }
        }

        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);
        candles.retain(|c| c.within(from_ms, to_ms));

        Ok(CandlesResult {
            exchange: self.exchange.clone(),
            instrument: instrument.to_string(),
            timeframe,
            candles,
            status,
            batches,
            elapsed: started.elapsed(),
            fetched_at: Utc::now(),
        })
    }

    fn warn_batch_cap(&self, batches: u32, max_batches: u32, instrument: &str, timeframe: Timeframe) {
        if batches == max_batches {
            warn!(
                "{}: stopped {} {} candles after {} batches",
                self.exchange, instrument, timeframe, batches
            );
        }
    }

    fn candle_batch(&self, query: CandleQuery) -> ConnectorResult<(FetchStatus, Vec<Candle>)> {
        let normalizer = Normalizer::new(&self.profile);
        let instrument = query.instrument.clone();
        let mut batch = Vec::new();
        let request = Request::get_historical_candles(self.exchange.clone(), query);

        let status = self.round_trip(request, |message| {
            let Message::CandleList(list) = message else {
                return Ok(false);
            };
            for element in &list.elements {
                let candle = normalizer
                    .normalize_candle(&instrument, element)
                    .map_err(|source| self.normalize_error(source))?;
                batch.push(candle);
            }
            Ok(true)
        })?;

        Ok((status, batch))
    }

    /// Send `request` and feed each message answering it to `on_message`
    /// until that reports completion, the exchange reports an error, or the
    /// deadline passes. The caller holds `in_flight`.
    fn round_trip<F>(&self, request: Request, mut on_message: F) -> ConnectorResult<FetchStatus>
    where
        F: FnMut(Message) -> ConnectorResult<bool>,
    {
        let started = Instant::now();

        // Leftovers from an earlier request that timed out
        let stale = self.session.drain();
        if !stale.is_empty() {
            debug!("{}: discarded {} stale events", self.exchange, stale.len());
        }

        let correlation_id = request.correlation_id;
        let operation = request.operation.name();

        if let Err(e) = self.session.send(request) {
            error!("{}: failed to send {} request: {}", self.exchange, operation, e);
            return Ok(FetchStatus::SessionUnavailable(e.to_string()));
        }
        debug!(
            "{}: {} request {} sent via {}",
            self.exchange,
            operation,
            correlation_id,
            self.session.name()
        );

        let deadline = started + self.timing.timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let tick = self.timing.poll_interval.min(deadline - now);

            for event in self.session.wait(tick) {
                let Event::Response(response) = event else {
                    continue;
                };
                if !response.answers(correlation_id) {
                    debug!(
                        "{}: skipping response for {:?}",
                        self.exchange, response.correlation_id
                    );
                    continue;
                }

                for message in response.messages {
                    if let Message::ResponseError(err) = message {
                        warn!(
                            "{}: exchange rejected {} request: {}",
                            self.exchange, operation, err.details
                        );
                        return Ok(FetchStatus::ExchangeError(err.details));
                    }
                    if on_message(message)? {
                        return Ok(FetchStatus::Complete);
                    }
                }
            }
        }

        warn!(
            "{}: no answer to {} request within {:?}",
            self.exchange, operation, self.timing.timeout
        );
        Ok(FetchStatus::TimedOut)
    }

    fn normalize_error(&self, source: NormalizeError) -> ConnectorError {
        ConnectorError::Normalize {
            exchange: self.exchange.to_string(),
            source,
        }
    }
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CandleProfile;
    use meridian_core::{InstrumentKind, fields};
    use meridian_ports::{
        CandleList, Element, InstrumentList, Operation, Response, ResponseError, SessionError,
        SessionResult,
    };
    use std::collections::VecDeque;

    /// Answers each request with the next scripted batch of messages
    struct ScriptedSession {
        batches: Mutex<VecDeque<Vec<Event>>>,
        pending: Mutex<Vec<Event>>,
        sent: Mutex<Vec<Request>>,
        closed: bool,
    }

    impl ScriptedSession {
        fn new(batches: Vec<Vec<Event>>) -> Self {
            Self {
                batches: Mutex::new(batches.into()),
                pending: Mutex::new(Vec::new()),
                sent: Mutex::new(Vec::new()),
                closed: false,
            }
        }

        fn closed() -> Self {
            Self {
                closed: true,
                ..Self::new(Vec::new())
            }
        }

        fn last_request(&self) -> Request {
            self.sent.lock().last().cloned().unwrap()
        }
    }

    impl Session for ScriptedSession {
        fn send(&self, request: Request) -> SessionResult<()> {
            if self.closed {
                return Err(SessionError::Closed);
            }
            if let Some(batch) = self.batches.lock().pop_front() {
                for mut event in batch {
                    if let Event::Response(r) = &mut event {
                        r.correlation_id.get_or_insert(request.correlation_id);
                    }
                    self.pending.lock().push(event);
                }
            }
            self.sent.lock().push(request);
            Ok(())
        }

        fn drain(&self) -> Vec<Event> {
            std::mem::take(&mut *self.pending.lock())
        }
    }

    fn element(id: &str, base: &str, quote: &str) -> Element {
        [
            (fields::INSTRUMENT, id),
            (fields::BASE_ASSET, base),
            (fields::QUOTE_ASSET, quote),
            (fields::ORDER_PRICE_INCREMENT, "0.1"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn list(elements: Vec<Element>, has_more: bool) -> Event {
        Response::untagged(vec![Message::InstrumentList(InstrumentList::page(
            elements, has_more,
        ))])
        .into()
    }

    fn fast() -> PollTiming {
        PollTiming::new(Duration::from_millis(200), Duration::from_millis(10))
    }

    fn connector(session: Arc<dyn Session>) -> Connector {
        let profile = ExchangeProfile::new("Binance", InstrumentKind::Spot);
        Connector::new(profile, session, fast())
    }

    #[test]
    fn test_complete_on_first_list() {
        let _ = env_logger::try_init();
        let session = Arc::new(ScriptedSession::new(vec![vec![
            list(vec![element("BTCUSDT", "BTC", "USDT")], false),
            list(vec![element("ETHUSDT", "ETH", "USDT")], false),
        ]]));
        let connector = connector(session.clone());

        let result = connector.fetch_instruments().unwrap();
        assert_eq!(result.status, FetchStatus::Complete);
        assert_eq!(result.exchange.as_str(), "binance");
        assert_eq!(result.instruments.len(), 1);
        assert_eq!(result.instruments[0].symbol, "BTC/USDT");

        let request = session.last_request();
        assert_eq!(request.exchange.as_str(), "binance");
    }

    #[test]
    fn test_pages_accumulate_until_last() {
        let session = Arc::new(ScriptedSession::new(vec![vec![
            list(vec![element("A", "A", "USD")], true),
            list(vec![element("B", "B", "USD"), element("C", "C", "USD")], false),
        ]]));

        let result = connector(session).fetch_instruments().unwrap();
        assert!(result.status.is_complete());
        let ids: Vec<_> = result.instruments.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn test_exchange_error_keeps_accumulated() {
        let session = Arc::new(ScriptedSession::new(vec![vec![
            list(vec![element("A", "A", "USD")], true),
            Response::untagged(vec![Message::ResponseError(ResponseError::new(
                "rate limited",
            ))])
            .into(),
        ]]));

        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(
            result.status,
            FetchStatus::ExchangeError("rate limited".to_string())
        );
        assert_eq!(result.instruments.len(), 1);
    }

    #[test]
    fn test_timeout_when_silent() {
        let session = Arc::new(ScriptedSession::new(vec![vec![
            Event::Status {
                detail: "connected".to_string(),
            },
            Response::untagged(vec![Message::Other {
                kind: "ack".to_string(),
            }])
            .into(),
        ]]));

        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(result.status, FetchStatus::TimedOut);
        assert!(result.instruments.is_empty());
        assert!(result.elapsed >= Duration::from_millis(200));
    }

    #[test]
    fn test_send_failure_is_session_unavailable() {
        let session = Arc::new(ScriptedSession::closed());

        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(
            result.status,
            FetchStatus::SessionUnavailable(SessionError::Closed.to_string())
        );
        assert!(result.instruments.is_empty());
    }

    #[test]
    fn test_foreign_correlation_is_skipped() {
        let foreign = Request::get_instruments("binance");
        let session = Arc::new(ScriptedSession::new(vec![vec![
            Response::to(
                &foreign,
                vec![Message::InstrumentList(InstrumentList::new(vec![element(
                    "OLD", "O", "LD",
                )]))],
            )
            .into(),
            list(vec![element("NEW", "N", "EW")], false),
        ]]));

        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(result.instruments.len(), 1);
        assert_eq!(result.instruments[0].id, "NEW");
    }

    #[test]
    fn test_stale_events_are_discarded() {
        let session = Arc::new(ScriptedSession::new(vec![vec![list(
            vec![element("FRESH", "F", "X")],
            false,
        )]]));
        session
            .pending
            .lock()
            .push(list(vec![element("STALE", "S", "X")], false));

        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(result.instruments[0].id, "FRESH");
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let mut bad = element("BTCUSDT", "BTC", "USDT");
        bad.insert(fields::ORDER_PRICE_INCREMENT.to_string(), "n/a".to_string());
        let session = Arc::new(ScriptedSession::new(vec![vec![list(vec![bad], false)]]));

        let err = connector(session).get_instruments().unwrap_err();
        let ConnectorError::Normalize { exchange, source } = err else {
            panic!("expected a normalize error, got {err:?}");
        };
        assert_eq!(exchange, "binance");
        assert!(source.to_string().contains("n/a"));
    }

    const MINUTE: u64 = 60_000;

    fn candle(ts: u64) -> Element {
        [
            (fields::TIMESTAMP, ts.to_string()),
            (fields::OPEN_PRICE, "10".to_string()),
            (fields::HIGH_PRICE, "12".to_string()),
            (fields::LOW_PRICE, "9".to_string()),
            (fields::CLOSE_PRICE, "11".to_string()),
            (fields::VOLUME, "3.5".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn candles(stamps: &[u64]) -> Vec<Event> {
        vec![
            Response::untagged(vec![Message::CandleList(CandleList::new(
                stamps.iter().map(|ts| candle(*ts)).collect(),
            ))])
            .into(),
        ]
    }

    fn candle_connector(session: Arc<dyn Session>, candles: CandleProfile) -> Connector {
        let profile = ExchangeProfile::new("okx", InstrumentKind::Spot).with_candles(candles);
        Connector::new(profile, session, fast())
    }

    fn queries(session: &ScriptedSession) -> Vec<CandleQuery> {
        session
            .sent
            .lock()
            .iter()
            .filter_map(|r| match &r.operation {
                Operation::GetHistoricalCandles(query) => Some(query.clone()),
                Operation::GetInstruments => None,
            })
            .collect()
    }

    #[test]
    fn test_candles_unsupported_without_profile() {
        let session = Arc::new(ScriptedSession::new(Vec::new()));
        let err = connector(session.clone())
            .fetch_candles("BTC-USDT", Timeframe::Minute1, None, None)
            .unwrap_err();

        assert_eq!(err, ConnectorError::CandlesUnsupported("binance".to_string()));
        assert!(session.sent.lock().is_empty());
    }

    #[test]
    fn test_single_batch_is_sorted_deduped_and_filtered() {
        let _ = env_logger::try_init();
        let session = Arc::new(ScriptedSession::new(vec![candles(&[
            5 * MINUTE,
            3 * MINUTE,
            4 * MINUTE,
            3 * MINUTE,
            9 * MINUTE,
        ])]));
        let connector = candle_connector(session.clone(), CandleProfile::default());

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, Some(3 * MINUTE), Some(5 * MINUTE))
            .unwrap();
        assert_eq!(result.status, FetchStatus::Complete);
        assert_eq!(result.batches, 1);
        assert_eq!(result.instrument, "BTC-USDT");
        let stamps: Vec<_> = result.candles.iter().map(|c| c.timestamp).collect();
        assert_eq!(stamps, [3 * MINUTE, 4 * MINUTE, 5 * MINUTE]);
        assert_eq!(result.candles[0].volume, 3.5);

        let sent = queries(&session);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].start_ms, Some(3 * MINUTE));
        assert_eq!(sent[0].end_ms, Some(5 * MINUTE));
        assert_eq!(sent[0].limit, 1000);
    }

    #[test]
    fn test_forward_paging_advances_past_newest() {
        let session = Arc::new(ScriptedSession::new(vec![
            candles(&[0, MINUTE]),
            candles(&[2 * MINUTE, 3 * MINUTE]),
            candles(&[]),
        ]));
        let profile = CandleProfile::new(CandlePaging::Forward, 2);
        let connector = candle_connector(session.clone(), profile);

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, Some(0), None)
            .unwrap();
        assert!(result.status.is_complete());
        assert_eq!(result.batches, 3);
        assert_eq!(result.candles.len(), 4);

        let starts: Vec<_> = queries(&session).iter().map(|q| q.start_ms).collect();
        assert_eq!(starts, [Some(0), Some(2 * MINUTE), Some(4 * MINUTE)]);
    }

    #[test]
    fn test_backward_paging_walks_to_start() {
        let session = Arc::new(ScriptedSession::new(vec![
            candles(&[10 * MINUTE, 9 * MINUTE, 8 * MINUTE]),
            candles(&[8 * MINUTE, 7 * MINUTE, 6 * MINUTE]),
            candles(&[6 * MINUTE, 5 * MINUTE, 4 * MINUTE]),
        ]));
        let profile = CandleProfile::new(CandlePaging::Backward, 3);
        let connector = candle_connector(session.clone(), profile);

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, Some(5 * MINUTE), Some(10 * MINUTE))
            .unwrap();
        assert_eq!(result.batches, 3);
        let stamps: Vec<_> = result.candles.iter().map(|c| c.timestamp / MINUTE).collect();
        assert_eq!(stamps, [5, 6, 7, 8, 9, 10]);

        let ends: Vec<_> = queries(&session).iter().map(|q| q.end_ms).collect();
        assert_eq!(
            ends,
            [Some(10 * MINUTE), Some(8 * MINUTE), Some(6 * MINUTE)]
        );
    }

    #[test]
    fn test_backward_paging_stops_without_progress() {
        let session = Arc::new(ScriptedSession::new(vec![
            candles(&[10 * MINUTE, 9 * MINUTE]),
            candles(&[10 * MINUTE, 9 * MINUTE]),
            candles(&[8 * MINUTE]),
        ]));
        let profile = CandleProfile::new(CandlePaging::Backward, 2);
        let connector = candle_connector(session.clone(), profile);

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, None, Some(10 * MINUTE))
            .unwrap();
        assert_eq!(result.batches, 2);
        assert_eq!(result.candles.len(), 2);
    }

    #[test]
    fn test_paging_stops_at_max_batches() {
        let session = Arc::new(ScriptedSession::new(vec![
            candles(&[0]),
            candles(&[MINUTE]),
            candles(&[2 * MINUTE]),
        ]));
        let profile = CandleProfile {
            max_batches: 2,
            ..CandleProfile::new(CandlePaging::Forward, 1)
        };
        let connector = candle_connector(session.clone(), profile);

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, Some(0), None)
            .unwrap();
        assert_eq!(result.batches, 2);
        assert_eq!(result.candles.len(), 2);
        assert_eq!(session.sent.lock().len(), 2);
    }

    #[test]
    fn test_candle_error_mid_walk_keeps_earlier_batches() {
        let session = Arc::new(ScriptedSession::new(vec![
            candles(&[0, MINUTE]),
            vec![
                Response::untagged(vec![Message::ResponseError(ResponseError::new(
                    "too many requests",
                ))])
                .into(),
            ],
        ]));
        let profile = CandleProfile::new(CandlePaging::Forward, 2);
        let connector = candle_connector(session, profile);

        let result = connector
            .fetch_candles("BTC-USDT", Timeframe::Minute1, Some(0), None)
            .unwrap();
        assert_eq!(
            result.status,
            FetchStatus::ExchangeError("too many requests".to_string())
        );
        assert_eq!(result.batches, 2);
        assert_eq!(result.candles.len(), 2);
    }

    #[test]
    fn test_candle_lists_do_not_answer_instrument_requests() {
        let session = Arc::new(ScriptedSession::new(vec![candles(&[0])]));
        let result = connector(session).fetch_instruments().unwrap();
        assert_eq!(result.status, FetchStatus::TimedOut);
    }

    #[test]
    fn test_default_timing() {
        let timing = PollTiming::default();
        assert_eq!(timing.timeout, Duration::from_secs(10));
        assert_eq!(timing.poll_interval, Duration::from_millis(100));
    }
}
