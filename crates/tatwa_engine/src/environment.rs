//! The tatwa environment: one computation session.
//!
//! State forms a dependency chain
//! `location -> reference date -> solar events -> query instant -> tatwas`.
//! Every setter validates and performs its lookups first, then commits and
//! clears whatever depends on the changed field (see [`StateField`]). A
//! setter that fails leaves the environment exactly as it was.
//!
//! Solar events come either from the [`SolarEventSource`] (derived mode) or
//! from [`TatwaEnvironment::set_manual_solar_events`] (manual mode).
//! Supplying them by hand drops the location and pinned dates; the
//! timezone is kept so "now" can still be expressed locally.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use tatwa_base::{SolarEvent, TATWA_ANCHORS, TATWA_COUNT};
use tatwa_time::{combine_local, now_local};
use tracing::{debug, info, warn};

use crate::error::{EnvironmentError, LookupError};
use crate::event_time::EventTime;
use crate::interval::{TatwaInterval, TatwaSlot, cycle_schedule, tatwa_interval};
use crate::location::Coordinates;
use crate::provider::{Providers, SolarDay};
use crate::state::{MANUAL_SUPERSEDES, StateField};

/// Computed tatwas keyed by anchor event. `None` marks an event whose cycle
/// does not contain the query instant.
pub type TatwaMap = BTreeMap<SolarEvent, Option<TatwaInterval>>;

/// One tatwa computation session.
#[derive(Debug)]
pub struct TatwaEnvironment {
    providers: Providers,
    anchors: Vec<SolarEvent>,

    address: Option<String>,
    coordinates: Option<Coordinates>,
    timezone: Option<Tz>,
    solar_date: Option<NaiveDate>,
    query_date: Option<NaiveDate>,
    query_time: Option<NaiveTime>,
    query_instant: Option<DateTime<Tz>>,
    solar_events: BTreeMap<SolarEvent, DateTime<Tz>>,
    day_length: Option<TimeDelta>,
    tatwas: TatwaMap,
}

impl TatwaEnvironment {
    /// Empty environment computing all four anchor events.
    pub fn new(providers: Providers) -> Self {
        Self {
            providers,
            anchors: TATWA_ANCHORS.to_vec(),
            address: None,
            coordinates: None,
            timezone: None,
            solar_date: None,
            query_date: None,
            query_time: None,
            query_instant: None,
            solar_events: BTreeMap::new(),
            day_length: None,
            tatwas: BTreeMap::new(),
        }
    }

    /// Restrict computation to `anchors`.
    ///
    /// Events that cannot anchor a cycle and duplicates are dropped. An
    /// empty result keeps the current anchors.
    pub fn with_anchors(mut self, anchors: impl IntoIterator<Item = SolarEvent>) -> Self {
        let mut chosen: Vec<SolarEvent> = Vec::new();
        for e in anchors {
            if e.is_tatwa_anchor() && !chosen.contains(&e) {
                chosen.push(e);
            }
        }
        if chosen.is_empty() {
            warn!("no usable anchor events given; keeping {:?}", self.anchors);
        } else {
            self.anchors = chosen;
        }
        self
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    fn clear(&mut self, field: StateField) {
        match field {
            StateField::Address => self.address = None,
            StateField::Coordinates => self.coordinates = None,
            StateField::SolarDate => self.solar_date = None,
            StateField::QueryDate => self.query_date = None,
            StateField::QueryTime => self.query_time = None,
            StateField::QueryInstant => self.query_instant = None,
            StateField::SolarEvents => {
                self.solar_events.clear();
                self.day_length = None;
            }
            StateField::Tatwas => self.tatwas.clear(),
        }
    }

    /// Clear everything derived from `changed`.
    fn invalidate(&mut self, changed: StateField) {
        for field in changed.invalidated() {
            self.clear(field);
        }
    }

    // -----------------------------------------------------------------------
    // Location
    // -----------------------------------------------------------------------

    /// Set the address.
    ///
    /// With `refresh_coordinates`, the address is geocoded and the result
    /// committed through [`set_coordinates`](Self::set_coordinates) before
    /// the address is stored. Otherwise the address is stored as given and
    /// the coordinates are left alone.
    pub fn set_address(
        &mut self,
        address: &str,
        refresh_coordinates: bool,
    ) -> Result<(), EnvironmentError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(EnvironmentError::EmptyAddress);
        }

        if refresh_coordinates {
            let location = self
                .providers
                .geocoder
                .geocode(address)
                .map_err(EnvironmentError::LocationResolution)?;
            debug!(address, %location, "geocoded");
            self.set_coordinates(location.latitude_deg(), location.longitude_deg(), false)?;
        }

        self.address = Some(address.to_string());
        self.invalidate(StateField::Address);
        info!(address, "address set");
        Ok(())
    }

    /// Set the coordinates and resolve their timezone.
    ///
    /// With `derive_address`, a human-readable address is also looked up;
    /// otherwise any previous address is dropped.
    pub fn set_coordinates(
        &mut self,
        latitude_deg: f64,
        longitude_deg: f64,
        derive_address: bool,
    ) -> Result<(), EnvironmentError> {
        let location = Coordinates::new(latitude_deg, longitude_deg)?;

        let zone = self
            .providers
            .timezones
            .resolve_timezone(location, None)
            .map_err(EnvironmentError::LocationResolution)?;
        let timezone: Tz = zone.zone_id.parse().map_err(|e| {
            EnvironmentError::LocationResolution(LookupError::Decode(format!(
                "unknown zone {:?}: {e}",
                zone.zone_id
            )))
        })?;

        let address = if derive_address {
            let found = self
                .providers
                .geocoder
                .reverse_geocode(location)
                .map_err(EnvironmentError::LocationResolution)?;
            Some(found)
        } else {
            None
        };

        self.coordinates = Some(location);
        self.timezone = Some(timezone);
        self.address = address;
        self.invalidate(StateField::Coordinates);
        info!(%location, zone = timezone.name(), address = ?self.address, "coordinates set");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Dates
    // -----------------------------------------------------------------------

    /// Pin the calendar date whose solar events anchor the cycles.
    /// `None` restores the "most recent occurrence" default.
    pub fn set_solar_date(&mut self, date: Option<NaiveDate>) {
        self.solar_date = date;
        self.invalidate(StateField::SolarDate);
        debug!(?date, "solar date set");
    }

    /// Pin the query date. `None` means today at computation time.
    pub fn set_query_date(&mut self, date: Option<NaiveDate>) {
        self.query_date = date;
        self.invalidate(StateField::QueryDate);
        debug!(?date, "query date set");
    }

    /// Pin the query time of day. `None` means now at computation time.
    pub fn set_query_time(&mut self, time: Option<NaiveTime>) {
        self.query_time = time;
        self.invalidate(StateField::QueryTime);
        debug!(?time, "query time set");
    }

    // -----------------------------------------------------------------------
    // Solar events
    // -----------------------------------------------------------------------

    /// Replace the solar events with caller-supplied times.
    ///
    /// Needs coordinates so the instants can be placed in the location's
    /// zone. Every value is validated before anything changes. On success the
    /// location, the pinned dates and the query instant are cleared.
    pub fn set_manual_solar_events<I, T>(&mut self, events: I) -> Result<(), EnvironmentError>
    where
        I: IntoIterator<Item = (SolarEvent, T)>,
        T: Into<EventTime>,
    {
        if self.coordinates.is_none() {
            return Err(EnvironmentError::MissingLocation);
        }
        let tz = self.timezone.ok_or(EnvironmentError::MissingLocation)?;

        let mut localized = BTreeMap::new();
        for (event, time) in events {
            let instant = time.into().localize(tz).map_err(|e| match e {
                EnvironmentError::InvalidEventTime(msg) => {
                    EnvironmentError::InvalidEventTime(format!("{event}: {msg}"))
                }
                other => other,
            })?;
            localized.insert(event, instant);
        }
        if localized.is_empty() {
            return Err(EnvironmentError::InvalidEventTime(
                "no solar events supplied".into(),
            ));
        }

        for field in MANUAL_SUPERSEDES {
            self.clear(field);
            self.invalidate(field);
        }
        self.solar_events = localized;
        self.invalidate(StateField::SolarEvents);
        info!(events = self.solar_events.len(), "manual solar events set");
        Ok(())
    }

    /// Fetch solar events for the current location.
    ///
    /// With a pinned solar date, that date's events are used as-is.
    /// Otherwise today's local date is fetched and every event that has not
    /// happened yet is replaced by the previous day's occurrence.
    pub fn refresh_solar_events(&mut self) -> Result<(), EnvironmentError> {
        let location = self.coordinates.ok_or(EnvironmentError::MissingLocation)?;
        let tz = self.timezone.ok_or(EnvironmentError::MissingLocation)?;

        let (events, day_length) = match self.solar_date {
            Some(date) => {
                let day = self.fetch_day(location, date)?;
                (localize_day(&day, tz), day.day_length)
            }
            None => self.most_recent_events(location, tz)?,
        };

        if events.is_empty() {
            return Err(EnvironmentError::SolarData(LookupError::NotFound(format!(
                "no solar events at {location}"
            ))));
        }

        self.solar_events = events;
        self.day_length = day_length;
        self.invalidate(StateField::SolarEvents);
        info!(
            %location,
            date = ?self.solar_date,
            events = self.solar_events.len(),
            "solar events refreshed"
        );
        Ok(())
    }

    fn fetch_day(
        &self,
        location: Coordinates,
        date: NaiveDate,
    ) -> Result<SolarDay, EnvironmentError> {
        debug!(%location, %date, "fetching solar events");
        self.providers
            .solar
            .fetch_solar_events(location, Some(date))
            .map_err(EnvironmentError::SolarData)
    }

    /// Today's events, with not-yet-happened ones rolled back one day.
    fn most_recent_events(
        &self,
        location: Coordinates,
        tz: Tz,
    ) -> Result<(BTreeMap<SolarEvent, DateTime<Tz>>, Option<TimeDelta>), EnvironmentError> {
        let now = now_local(tz, &*self.providers.clock)?;
        let today = now.date_naive();
        let day = self.fetch_day(location, today)?;
        let mut events = localize_day(&day, tz);
        let mut day_length = day.day_length;

        let pending: Vec<SolarEvent> = events
            .iter()
            .filter(|(_, instant)| **instant > now)
            .map(|(event, _)| *event)
            .collect();
        if pending.is_empty() {
            return Ok((events, day_length));
        }

        let yesterday = today.pred_opt().ok_or_else(|| {
            EnvironmentError::SolarData(LookupError::Decode(format!("no day before {today}")))
        })?;
        debug!(?pending, %yesterday, "events still ahead; using previous day");
        let previous = self.fetch_day(location, yesterday)?;
        let previous_events = localize_day(&previous, tz);

        for event in &pending {
            if let Some(instant) = previous_events.get(event) {
                events.insert(*event, *instant);
            }
        }
        if pending.contains(&SolarEvent::Sunrise) {
            day_length = previous.day_length;
        }
        Ok((events, day_length))
    }

    // -----------------------------------------------------------------------
    // Computation
    // -----------------------------------------------------------------------

    /// Compute the tatwa active at the query instant for every anchor event.
    ///
    /// Missing query date/time components default to the current local
    /// date/time. Fails with [`EnvironmentError::AllEventsIncoherent`] when
    /// no anchor's cycle contains the query instant; the new instant is not
    /// stored and any earlier instant and tatwas are dropped.
    pub fn compute_tatwas(&mut self) -> Result<&TatwaMap, EnvironmentError> {
        if self.solar_events.is_empty() {
            return Err(EnvironmentError::MissingSolarData);
        }
        let anchors: Vec<(SolarEvent, DateTime<Tz>)> = self
            .anchors
            .iter()
            .filter_map(|e| self.solar_events.get(e).map(|t| (*e, *t)))
            .collect();
        if anchors.is_empty() {
            return Err(EnvironmentError::MissingSolarData);
        }
        let tz = self.timezone.ok_or(EnvironmentError::MissingLocation)?;

        let query = combine_local(tz, self.query_date, self.query_time, &*self.providers.clock)?;

        let tatwas: TatwaMap = anchors
            .into_iter()
            .map(|(event, instant)| (event, tatwa_interval(instant, query)))
            .collect();
        if tatwas.values().all(Option::is_none) {
            warn!(%query, "query instant outside every tatwa cycle");
            self.clear(StateField::QueryInstant);
            self.invalidate(StateField::QueryInstant);
            return Err(EnvironmentError::AllEventsIncoherent);
        }

        for (event, interval) in &tatwas {
            match interval {
                Some(i) => debug!(%event, tatwa = %i.tatwa, start = %i.start, "tatwa computed"),
                None => debug!(%event, "incoherent"),
            }
        }
        self.query_instant = Some(query);
        self.tatwas = tatwas;
        Ok(&self.tatwas)
    }

    /// The five tatwa slots following `event`.
    pub fn schedule(
        &self,
        event: SolarEvent,
    ) -> Result<[TatwaSlot; TATWA_COUNT as usize], EnvironmentError> {
        if self.solar_events.is_empty() {
            return Err(EnvironmentError::MissingSolarData);
        }
        self.solar_events
            .get(&event)
            .map(|instant| cycle_schedule(*instant))
            .ok_or(EnvironmentError::EventNotAvailable(event))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// IANA identifier of the environment zone.
    pub fn timezone_id(&self) -> Option<&'static str> {
        self.timezone.map(|tz| tz.name())
    }

    /// Pinned solar reference date.
    pub fn solar_date(&self) -> Option<NaiveDate> {
        self.solar_date
    }

    pub fn query_date(&self) -> Option<NaiveDate> {
        self.query_date
    }

    pub fn query_time(&self) -> Option<NaiveTime> {
        self.query_time
    }

    /// Query instant used by the last successful computation.
    pub fn query_instant(&self) -> Option<DateTime<Tz>> {
        self.query_instant
    }

    pub fn anchors(&self) -> &[SolarEvent] {
        &self.anchors
    }

    pub fn solar_events(&self) -> &BTreeMap<SolarEvent, DateTime<Tz>> {
        &self.solar_events
    }

    pub fn solar_event(&self, event: SolarEvent) -> Option<DateTime<Tz>> {
        self.solar_events.get(&event).copied()
    }

    /// Day length of the fetched reference day, when the source reports it.
    pub fn day_length(&self) -> Option<TimeDelta> {
        self.day_length
    }

    /// Whether the current solar events were supplied by hand.
    pub fn is_manual(&self) -> bool {
        !self.solar_events.is_empty() && self.coordinates.is_none()
    }

    pub fn tatwas(&self) -> &TatwaMap {
        &self.tatwas
    }

    /// Computed interval for `event`; `None` if not computed or incoherent.
    pub fn tatwa(&self, event: SolarEvent) -> Option<&TatwaInterval> {
        self.tatwas.get(&event).and_then(Option::as_ref)
    }
}

fn localize_day(day: &SolarDay, tz: Tz) -> BTreeMap<SolarEvent, DateTime<Tz>> {
    day.events
        .iter()
        .map(|(event, instant)| (*event, instant.with_timezone(&tz)))
        .collect()
}
