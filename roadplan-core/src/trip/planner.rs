use std::time::{Duration, Instant};

use chrono::{NaiveTime, Timelike};
use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;

use super::result::{LegSummary, OrderedStop, RouteEntry, RouteLabel, TripResult};
use super::result::{round_km, whole_minutes};
use super::{PlanError, TripRequest};
use crate::config::EngineConfig;
use crate::fuel::{FuelCheck, FuelDecision, StationRegistry};
use crate::model::{Network, NodeLocator, Stop, StopResolver};
use crate::routing::{CostModel, Metric, PathSearch, PenaltyOverlay, SearchQuery};
use crate::{Minutes, NodeId, wrap_clock};

/// Per-call planning limits
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Checked before every leg search
    pub deadline: Option<Instant>,
}

impl PlanOptions {
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    fn check(&self) -> Result<(), PlanError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(PlanError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// Plans trips over a shared, read-only network.
///
/// Stops are resolved to coordinates by `R` and snapped to network nodes by
/// `L`, which defaults to the network's own spatial index.
pub struct TripPlanner<'a, R: ?Sized, L: ?Sized = Network> {
    network: &'a Network,
    locator: &'a L,
    config: &'a EngineConfig,
    resolver: &'a R,
    stations: Option<&'a StationRegistry>,
}

impl<'a, R: StopResolver + ?Sized> TripPlanner<'a, R> {
    pub fn new(
        network: &'a Network,
        config: &'a EngineConfig,
        resolver: &'a R,
        stations: Option<&'a StationRegistry>,
    ) -> Self {
        Self {
            network,
            locator: network,
            config,
            resolver,
            stations,
        }
    }
}

impl<'a, R, L> TripPlanner<'a, R, L>
where
    R: StopResolver + ?Sized,
    L: NodeLocator + ?Sized,
{
    /// Replaces the nearest-node lookup
    pub fn with_locator<M: NodeLocator + ?Sized>(self, locator: &'a M) -> TripPlanner<'a, R, M> {
        TripPlanner {
            network: self.network,
            locator,
            config: self.config,
            resolver: self.resolver,
            stations: self.stations,
        }
    }

    /// # Errors
    ///
    /// See [`TripPlanner::plan_with`].
    pub fn plan(&self, request: &TripRequest) -> Result<TripResult, PlanError> {
        self.plan_with(request, PlanOptions::default())
    }

    /// Plans one trip.
    ///
    /// Two stops (after a possible refuel stop insertion) yield a primary
    /// route and, when one exists, an alternative. Longer trips are routed
    /// leg by leg; legs without a path are skipped and reported in `legs`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed start time, an unknown mode or fewer than two
    /// stops. A two-stop trip also fails if a stop cannot be resolved or no
    /// path exists. Any trip fails once `options.deadline` has passed.
    pub fn plan_with(
        &self,
        request: &TripRequest,
        options: PlanOptions,
    ) -> Result<TripResult, PlanError> {
        let start_clock = parse_start_time(&request.start_time)?;
        let profile = self
            .config
            .modes
            .get(&request.mode)
            .ok_or_else(|| PlanError::UnknownMode(request.mode.clone()))?;
        if request.stops.len() < 2 {
            return Err(PlanError::TooFewStops(request.stops.len()));
        }

        let metric = Metric::for_algorithm(&request.algorithm);
        let planner = &self.config.planner;
        let fuel = FuelCheck::new(self.resolver, self.stations, planner.road_factor)
            .evaluate(request.stops.clone(), request.fuel.as_ref());

        let costs = CostModel::new(profile, &self.config.traffic, planner.speed_floor);
        let search = PathSearch::new(self.network, costs);

        debug!(
            "Planning {} stops by {} ({}) from {}",
            fuel.stops.len(),
            request.mode,
            metric,
            request.start_time
        );

        if fuel.stops.len() == 2 {
            self.plan_pair(&search, fuel, metric, start_clock, options)
        } else {
            self.plan_legs(&search, fuel, metric, start_clock, options)
        }
    }

    /// Plans independent requests in parallel, results in request order
    pub fn plan_batch(&self, requests: &[TripRequest]) -> Vec<Result<TripResult, PlanError>>
    where
        R: Sync,
        L: Sync,
    {
        requests
            .par_iter()
            .map(|request| self.plan(request))
            .collect()
    }

    fn locate(&self, stop: &Stop) -> Option<NodeId> {
        let coordinate = stop.resolve(self.resolver)?;
        self.locator.nearest_node(coordinate)
    }

    fn plan_pair(
        &self,
        search: &PathSearch<'_>,
        fuel: FuelDecision,
        metric: Metric,
        start_clock: Minutes,
        options: PlanOptions,
    ) -> Result<TripResult, PlanError> {
        let mut nodes = Vec::with_capacity(2);
        for stop in &fuel.stops {
            let node = self.locate(stop).ok_or_else(|| {
                warn!("Cannot resolve stop '{}'", stop.describe());
                PlanError::UnresolvableStop(stop.describe())
            })?;
            nodes.push(node);
        }
        options.check()?;

        let query = SearchQuery::new(nodes[0], nodes[1], metric, start_clock);
        let found = search
            .search_with_alternative(&query, self.config.planner.penalty_factor)
            .ok_or(PlanError::NoPath)?;

        let mut routes = vec![RouteEntry::new(RouteLabel::Primary, found.primary)];
        if let Some(alternative) = found.alternative {
            routes.push(RouteEntry::new(RouteLabel::Alternative, alternative));
        }

        Ok(TripResult::Alternatives {
            routes,
            fuel_alert: fuel.alert,
            fuel_stop: fuel.inserted,
        })
    }

    fn plan_legs(
        &self,
        search: &PathSearch<'_>,
        fuel: FuelDecision,
        metric: Metric,
        start_clock: Minutes,
        options: PlanOptions,
    ) -> Result<TripResult, PlanError> {
        let ordered_stops = fuel
            .stops
            .iter()
            .map(|stop| OrderedStop::from_stop(stop, self.resolver))
            .collect();
        let nodes: Vec<_> = fuel.stops.iter().map(|stop| self.locate(stop)).collect();

        let mut segments = Vec::new();
        let mut legs = Vec::with_capacity(nodes.len() - 1);
        let mut time = 0;
        let mut distance_km = 0.0;
        let mut clock = start_clock;

        for (from_stop, (from, to)) in nodes.iter().tuple_windows().enumerate() {
            options.check()?;
            let to_stop = from_stop + 1;

            let (Some(from), Some(to)) = (from, to) else {
                let unresolved = if from.is_none() { from_stop } else { to_stop };
                let reason = format!(
                    "cannot resolve stop '{}'",
                    fuel.stops[unresolved].describe()
                );
                warn!("Skipping leg {from_stop} -> {to_stop}: {reason}");
                legs.push(LegSummary::Skipped {
                    from_stop,
                    to_stop,
                    reason,
                });
                continue;
            };

            let query = SearchQuery::new(*from, *to, metric, clock);
            let Some(result) = search.search(&query, &PenaltyOverlay::empty()) else {
                warn!("Skipping leg {from_stop} -> {to_stop}: no path from {from} to {to}");
                legs.push(LegSummary::Skipped {
                    from_stop,
                    to_stop,
                    reason: "no path found".to_string(),
                });
                continue;
            };

            let leg_time = whole_minutes(result.minutes);
            legs.push(LegSummary::Routed {
                from_stop,
                to_stop,
                depart_clock: wrap_clock(clock),
                arrival_clock: result.arrival_clock,
                time: leg_time,
                dist: round_km(result.distance_km),
            });
            time += leg_time;
            distance_km += result.distance_km;
            clock = wrap_clock(result.arrival_clock + self.config.planner.dwell_minutes);
            segments.extend(result.segments);
        }

        Ok(TripResult::Multistop {
            segments,
            ordered_stops,
            legs,
            time,
            dist: round_km(distance_km),
            fuel_alert: fuel.alert,
            fuel_stop: fuel.inserted,
        })
    }
}

/// `HH:MM` to minutes after midnight
fn parse_start_time(value: &str) -> Result<Minutes, PlanError> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| PlanError::InvalidStartTime(value.to_string()))?;
    Ok(f64::from(time.hour() * 60 + time.minute()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::FuelParams;
    use crate::model::Coordinate;
    use crate::test_support::{RING, close, diamond, line, places};

    fn stops(names: &[&str]) -> Vec<Stop> {
        names.iter().map(|name| Stop::named(*name)).collect()
    }

    fn routes(result: TripResult) -> Vec<RouteEntry> {
        match result {
            TripResult::Alternatives { routes, .. } => routes,
            other => panic!("expected alternatives, got {other:?}"),
        }
    }

    #[test]
    fn start_time_parsing() {
        assert_eq!(parse_start_time("00:00"), Ok(0.0));
        assert_eq!(parse_start_time("07:30"), Ok(450.0));
        assert_eq!(parse_start_time("23:59"), Ok(1439.0));
        for bad in ["24:00", "12:60", "noon", ""] {
            assert_eq!(
                parse_start_time(bad),
                Err(PlanError::InvalidStartTime(bad.to_string()))
            );
        }
    }

    #[test]
    fn two_stops_give_primary_and_alternative() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        let result = planner
            .plan(&TripRequest::new(stops(&["Home", "Office"]), "car", "03:00"))
            .unwrap();
        assert!(!result.fuel_alert());
        let routes = routes(result);

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].label, RouteLabel::Primary);
        assert_eq!(routes[0].simple_path, vec![1, 5, 4]);
        assert_eq!(routes[0].time, 2);
        assert!(close(routes[0].dist, 4.0));
        assert_eq!(routes[1].label, RouteLabel::Alternative);
        assert_eq!(routes[1].simple_path, vec![1, 2, 4]);
        assert_eq!(routes[1].time, 4);
    }

    #[test]
    fn dijkstra_selects_shortest() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        let request = TripRequest::new(stops(&["Home", "Office"]), "car", "17:00")
            .with_algorithm("dijkstra");
        let routes = routes(planner.plan(&request).unwrap());
        assert_eq!(routes[0].simple_path, vec![1, 3, 4]);
        assert!(close(routes[0].dist, 3.0));
    }

    #[test]
    fn same_start_and_end() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        let routes = routes(
            planner
                .plan(&TripRequest::new(stops(&["Home", "Home"]), "car", "10:00"))
                .unwrap(),
        );
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].simple_path, vec![1]);
        assert_eq!(routes[0].time, 0);
        assert!(close(routes[0].dist, 0.0));
        assert!(close(routes[0].arrival_clock, 600.0));
    }

    #[test]
    fn request_errors() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let pair = stops(&["Home", "Office"]);

        assert_eq!(
            planner.plan(&TripRequest::new(pair.clone(), "plane", "03:00")),
            Err(PlanError::UnknownMode("plane".into()))
        );
        assert_eq!(
            planner.plan(&TripRequest::new(pair, "car", "3pm")),
            Err(PlanError::InvalidStartTime("3pm".into()))
        );
        assert_eq!(
            planner.plan(&TripRequest::new(stops(&["Home"]), "car", "03:00")),
            Err(PlanError::TooFewStops(1))
        );
        assert_eq!(
            planner.plan(&TripRequest::new(stops(&["Home", "Atlantis"]), "car", "03:00")),
            Err(PlanError::UnresolvableStop("Atlantis".into()))
        );
    }

    #[test]
    fn two_stops_without_path() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        assert_eq!(
            planner.plan(&TripRequest::new(stops(&["Home", "Island"]), "car", "03:00")),
            Err(PlanError::NoPath)
        );
        // the depot is only reachable over a motorway
        assert_eq!(
            planner.plan(&TripRequest::new(stops(&["Home", "Depot"]), "bike", "03:00")),
            Err(PlanError::NoPath)
        );
        assert_eq!(PlanError::NoPath.to_string(), "No path found");
    }

    #[test]
    fn multistop_carries_clock_with_dwell() {
        let network = line();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        let request = TripRequest::new(
            vec![
                Stop::point(33.60, 73.00),
                Stop::point(33.60, 73.01),
                Stop::point(33.60, 73.02),
            ],
            "car",
            "03:00",
        );
        let TripResult::Multistop {
            segments,
            ordered_stops,
            legs,
            time,
            dist,
            ..
        } = planner.plan(&request).unwrap()
        else {
            panic!("expected a multistop result");
        };

        assert_eq!(segments.len(), 2);
        assert_eq!(ordered_stops.len(), 3);
        assert_eq!(ordered_stops[2].lon, Some(73.02));
        assert_eq!(time, 4);
        assert!(close(dist, 2.0));
        let LegSummary::Routed {
            from_stop,
            to_stop,
            depart_clock,
            arrival_clock,
            time,
            ..
        } = legs[0]
        else {
            panic!("first leg should be routed");
        };
        assert_eq!((from_stop, to_stop, time), (0, 1, 2));
        assert!(close(depart_clock, 180.0));
        assert!(close(arrival_clock, 182.0));

        // second leg leaves after the dwell at the intermediate stop
        let LegSummary::Routed { depart_clock, .. } = legs[1] else {
            panic!("second leg should be routed");
        };
        assert!(close(depart_clock, 187.0));
    }

    #[test]
    fn multistop_skips_legs_without_path() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        // nothing leaves the depot
        let request =
            TripRequest::new(stops(&["Home", "Depot", "Market", "Office"]), "car", "03:00");
        let TripResult::Multistop {
            segments,
            legs,
            time,
            dist,
            ..
        } = planner.plan(&request).unwrap()
        else {
            panic!("expected a multistop result");
        };

        assert_eq!(legs.len(), 3);
        assert!(legs[0].is_routed());
        assert_eq!(
            legs[1],
            LegSummary::Skipped {
                from_stop: 1,
                to_stop: 2,
                reason: "no path found".into()
            }
        );
        let LegSummary::Routed { depart_clock, .. } = legs[2] else {
            panic!("third leg should be routed");
        };
        assert!(close(depart_clock, 188.0));
        assert_eq!(segments.len(), 4);
        assert_eq!(time, 5);
        assert!(close(dist, 7.0));
    }

    #[test]
    fn multistop_reports_unresolvable_stop() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);

        let request = TripRequest::new(stops(&["Home", "Atlantis", "Office"]), "car", "03:00");
        let TripResult::Multistop {
            legs,
            ordered_stops,
            time,
            ..
        } = planner.plan(&request).unwrap()
        else {
            panic!("expected a multistop result");
        };

        assert!(legs.iter().all(|leg| !leg.is_routed()));
        assert_eq!(ordered_stops[1].name.as_deref(), Some("Atlantis"));
        assert_eq!(ordered_stops[1].lat, None);
        assert_eq!(time, 0);
    }

    #[test]
    fn fuel_stop_turns_pair_into_multistop() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let stations: StationRegistry = [("Pump", RING)].into_iter().collect();
        let planner = TripPlanner::new(&network, &config, &gazetteer, Some(&stations));

        let request = TripRequest::new(stops(&["Home", "Office"]), "car", "03:00")
            .with_fuel(FuelParams::new(10.0, 0.0));
        let result = planner.plan(&request).unwrap();

        assert!(result.fuel_alert());
        assert_eq!(result.fuel_stop(), Some("Pump"));
        let TripResult::Multistop {
            ordered_stops,
            legs,
            ..
        } = result
        else {
            panic!("expected a multistop result");
        };
        assert_eq!(ordered_stops.len(), 3);
        assert_eq!(ordered_stops[1].name.as_deref(), Some("Pump"));
        assert!(legs.iter().all(LegSummary::is_routed));
    }

    #[test]
    fn repeated_plans_are_identical() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let request = TripRequest::new(stops(&["Home", "Market", "Office"]), "bike", "08:20");

        assert_eq!(planner.plan(&request), planner.plan(&request));
    }

    #[test]
    fn expired_deadline() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let request = TripRequest::new(stops(&["Home", "Market", "Office"]), "car", "08:00");

        assert_eq!(
            planner.plan_with(&request, PlanOptions::with_deadline(Instant::now())),
            Err(PlanError::DeadlineExceeded)
        );
        assert!(
            planner
                .plan_with(&request, PlanOptions::with_timeout(Duration::from_secs(60)))
                .is_ok()
        );
    }

    #[test]
    fn batch_keeps_request_order() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let planner = TripPlanner::new(&network, &config, &gazetteer, None);
        let requests = vec![
            TripRequest::new(stops(&["Home", "Office"]), "car", "03:00"),
            TripRequest::new(stops(&["Home", "Island"]), "car", "03:00"),
            TripRequest::new(stops(&["Home", "Office"]), "walk", "03:00"),
        ];

        let results = planner.plan_batch(&requests);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(PlanError::NoPath));
        assert_eq!(results[2], Err(PlanError::UnknownMode("walk".into())));
    }

    struct Snap(NodeId);

    impl NodeLocator for Snap {
        fn nearest_node(&self, _at: Coordinate) -> Option<NodeId> {
            Some(self.0)
        }
    }

    #[test]
    fn custom_locator() {
        let network = diamond();
        let config = EngineConfig::default();
        let gazetteer = places();
        let snap = Snap(4);
        let planner = TripPlanner::new(&network, &config, &gazetteer, None).with_locator(&snap);

        let routes = routes(
            planner
                .plan(&TripRequest::new(stops(&["Home", "Office"]), "car", "03:00"))
                .unwrap(),
        );
        assert_eq!(routes[0].simple_path, vec![4]);
    }
}
