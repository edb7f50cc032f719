use std::sync::Mutex;

use super::*;
use crate::arrivals::Boarding;
use crate::lifecycle::WorkerLifeCycle;
use crate::path::{ChainPathMapper, PathCriteria};
use crate::transit::{
    DefaultCostCalculator, DefaultSlackProvider, ForwardTransitCalculator, SearchDirection,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("raptor_core=debug")
        .with_test_writer()
        .try_init();
}

struct Fixture {
    calculator: ForwardTransitCalculator,
    cost: DefaultCostCalculator,
    slack: DefaultSlackProvider,
    mapper: ChainPathMapper,
}

impl Fixture {
    fn new(latest_arrival_time: Option<i32>) -> Self {
        Self {
            calculator: ForwardTransitCalculator::new(latest_arrival_time),
            cost: DefaultCostCalculator::default(),
            slack: DefaultSlackProvider::default(),
            mapper: ChainPathMapper::default(),
        }
    }

    fn collector(&self) -> DestinationArrivalPaths<'_> {
        self.collector_with(&self.mapper, None)
    }

    fn collector_with<'a>(
        &'a self,
        mapper: &'a dyn PathMapper,
        debug_handler: Option<Arc<dyn DebugHandler<Path>>>,
    ) -> DestinationArrivalPaths<'a> {
        DestinationArrivalPaths::new(
            PathComparator::new(PathCriteria::Standard, SearchDirection::Forward),
            &self.calculator,
            Some(&self.cost),
            &self.slack,
            mapper,
            debug_handler,
        )
    }
}

/// Walk to stop 1 leaving at 1000, then ride trip `trip` to stop 2.
fn bus_to_stop_2(
    arrivals: &mut StopArrivals,
    trip: usize,
    arrival_time: i32,
    c1: i32,
) -> ArrivalId {
    let access = arrivals.access(1000, AccessEgress::walk(1, 60, 6000));
    arrivals.transit(
        access,
        2,
        arrival_time,
        c1,
        Boarding {
            board_stop: 1,
            board_time: 1100,
            trip,
        },
    )
}

fn walk_egress() -> AccessEgress {
    AccessEgress::walk(2, 300, 30_000)
}

#[derive(Default)]
struct Recording {
    events: Mutex<Vec<String>>,
}

impl Recording {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DebugHandler<Path> for Recording {
    fn accept(&self, path: &Path) {
        self.events
            .lock()
            .unwrap()
            .push(format!("accept {}", path.end_time()));
    }

    fn reject(&self, path: &Path, rejected_by: Option<&Path>, reason: &str) {
        let by = rejected_by.map(Path::end_time);
        self.events
            .lock()
            .unwrap()
            .push(format!("reject {} by {by:?}: {reason}", path.end_time()));
    }

    fn dropped(&self, path: &Path, dropped_by: Option<&Path>, _reason: &str) {
        let by = dropped_by.map(Path::end_time);
        self.events
            .lock()
            .unwrap()
            .push(format!("drop {} by {by:?}", path.end_time()));
    }
}

/// Maps correctly, then inflates the cost.
struct OvercostingMapper;

impl PathMapper for OvercostingMapper {
    fn map_to_path(
        &self,
        arrivals: &StopArrivals,
        destination: &DestinationArrival,
        iteration_departure_time: Option<i32>,
    ) -> Path {
        let path =
            ChainPathMapper::default().map_to_path(arrivals, destination, iteration_departure_time);
        Path::new(
            path.iteration_departure_time(),
            path.legs().to_vec(),
            path.number_of_transfers(),
            path.c1() + 100,
        )
    }
}

fn next_round(life_cycle: &mut WorkerLifeCycle, paths: &mut DestinationArrivalPaths<'_>) -> u32 {
    let subscriber: &mut dyn LifeCycleSubscriber = paths;
    life_cycle.prepare_for_next_round(&mut [subscriber])
}

#[test]
fn adds_path_and_flags_round() {
    init_tracing();
    let fixture = Fixture::new(None);
    let mut paths = fixture.collector();
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);

    assert!(paths.is_empty());
    paths.add(&arrivals, bus, &walk_egress());

    assert!(paths.is_reached_current_round());
    assert_eq!(paths.len(), 1);
    let path = &paths.list_paths()[0];
    assert_eq!(path.start_time(), 1000);
    assert_eq!(path.end_time(), 2300);
    assert_eq!(path.number_of_transfers(), 0);
    assert_eq!(path.c1(), 130_000);
}

#[test]
fn time_limit_rejects_regardless_of_cost() {
    let fixture = Fixture::new(Some(2200));
    let recording = Arc::new(Recording::default());
    let handler: Arc<dyn DebugHandler<Path>> = recording.clone();
    let mut paths = fixture.collector_with(&fixture.mapper, Some(handler));
    let mut arrivals = StopArrivals::default();
    // Free ride, but the walk off lands at 2300.
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 0);

    paths.add(&arrivals, bus, &walk_egress());

    assert!(paths.is_empty());
    assert!(!paths.is_reached_current_round());
    assert_eq!(
        recording.events(),
        vec![
            "reject 2300 by None: The arrival time exceeds the time limit, arrive to late: 00:36:40."
        ]
    );
}

#[test]
fn unusable_egress_is_a_no_op() {
    let fixture = Fixture::new(None);
    let mut paths = fixture.collector();
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);
    let closed = walk_egress().with_opening_hours(0, 1500);

    paths.add(&arrivals, bus, &closed);
    assert!(paths.is_empty());
    assert!(!paths.is_reached_current_round());

    paths.add(&arrivals, bus, &walk_egress());
    paths.add(&arrivals, bus, &closed);
    assert_eq!(paths.len(), 1);
    assert!(paths.is_reached_current_round());
}

/// Log output captured by a test-local subscriber.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// The only test that makes the mapper and the stop arrivals disagree, so it
// owns the first permit of the process-wide throttle.
#[test]
fn cost_mismatch_warns_and_still_adds_path() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let fixture = Fixture::new(None);
    let mut paths = fixture.collector_with(&OvercostingMapper, None);
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);

    tracing::subscriber::with_default(subscriber, || {
        paths.add(&arrivals, bus, &walk_egress());
    });

    assert_eq!(paths.len(), 1);
    assert_eq!(paths.list_paths()[0].c1(), 130_100);

    let output = log.contents();
    assert!(output.contains("WARN"), "{output}");
    assert!(
        output.contains("cost mismatch between path mapper and stop arrivals"),
        "{output}"
    );
    assert!(output.contains("mapper=$1301.00"), "{output}");
    assert!(output.contains("stop_arrivals=$1300 $1000 $60"), "{output}");
}

#[test]
fn raptor_costs_run_from_destination_to_access() {
    let fixture = Fixture::new(None);
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_050);
    let factory =
        DestinationArrivalFactory::new(&fixture.calculator, Some(&fixture.cost), &fixture.slack);
    let destination = factory.create(&arrivals, bus, &walk_egress()).unwrap();

    assert_eq!(raptor_costs(&arrivals, &destination), "$1300.50 $1000.50 $60");
}

#[test]
fn qualify_agrees_with_add() {
    let fixture = Fixture::new(None);
    let mut paths = fixture.collector();
    paths.set_iteration_departure_time(1000);
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);

    assert!(paths.qualify(1000, 2300, 0, 130_000));
    paths.add(&arrivals, bus, &walk_egress());
    assert_eq!(paths.len(), 1);

    // The same criteria again are equivalent, so not kept.
    assert!(!paths.qualify(1000, 2300, 0, 130_000));
    paths.add(&arrivals, bus, &walk_egress());
    assert_eq!(paths.len(), 1);

    assert!(!paths.qualify(1000, 2400, 1, 130_000));
    assert!(paths.qualify(1000, 2200, 0, 200_000));
}

#[test]
fn life_cycle_resets_round_flag() {
    let fixture = Fixture::new(None);
    let mut paths = fixture.collector();
    let mut life_cycle = WorkerLifeCycle::new();
    let mut arrivals = StopArrivals::default();

    {
        let subscriber: &mut dyn LifeCycleSubscriber = &mut paths;
        life_cycle.setup_iteration(900, &mut [subscriber]);
    }
    assert_eq!(next_round(&mut life_cycle, &mut paths), 1);
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);
    paths.add(&arrivals, bus, &walk_egress());
    assert!(paths.is_reached_current_round());

    assert_eq!(next_round(&mut life_cycle, &mut paths), 2);
    assert!(!paths.is_reached_current_round());

    // A dominated arrival in round two leaves the flag down.
    let slow = bus_to_stop_2(&mut arrivals, 4, 2100, 100_000);
    paths.add(&arrivals, slow, &walk_egress());
    assert!(!paths.is_reached_current_round());

    assert_eq!(paths.list_paths()[0].iteration_departure_time(), 900);
}

#[test]
fn debug_handler_sees_every_decision() {
    let fixture = Fixture::new(None);
    let recording = Arc::new(Recording::default());
    let handler: Arc<dyn DebugHandler<Path>> = recording.clone();
    let mut paths = fixture.collector_with(&fixture.mapper, Some(handler));
    let mut arrivals = StopArrivals::default();

    let slow = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);
    let fast = bus_to_stop_2(&mut arrivals, 4, 1900, 90_000);
    let slowest = bus_to_stop_2(&mut arrivals, 5, 2100, 110_000);

    paths.add(&arrivals, slow, &walk_egress());
    paths.add(&arrivals, fast, &walk_egress());
    paths.add(&arrivals, slowest, &walk_egress());
    paths.debug_reject(&arrivals, slowest, &walk_egress(), "pruned");

    assert!(paths.is_debug_on());
    assert_eq!(
        recording.events(),
        vec![
            "accept 2300",
            "drop 2300 by Some(2200)",
            "accept 2200",
            "reject 2400 by Some(2200): Dominated by an existing element",
            "reject 2400 by None: pruned",
        ]
    );
    assert_eq!(paths.into_paths().len(), 1);
}

#[test]
fn debug_reject_is_silent_without_handler() {
    let fixture = Fixture::new(None);
    let paths = fixture.collector();
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);

    assert!(!paths.is_debug_on());
    paths.debug_reject(&arrivals, bus, &walk_egress(), "pruned");
    assert!(paths.is_empty());
}

#[test]
fn renders_paths_with_stop_names() {
    let fixture = Fixture::new(None);
    let mut paths = fixture.collector();
    let mut arrivals = StopArrivals::default();
    let bus = bus_to_stop_2(&mut arrivals, 3, 2000, 100_000);
    paths.add(&arrivals, bus, &walk_egress());

    let names = |stop: usize| ["Origin", "Alpha", "Beta"][stop].to_string();
    assert_eq!(
        paths.to_string_with(&names),
        "Access 1m ~ Alpha ~ Trip 3 00:18:20 00:33:20 ~ Beta ~ Egress 5m [00:16:40 00:38:20 21m40s Tx0 $1300.00]"
    );
    assert_eq!(
        paths.to_string(),
        "Access 1m ~ 1 ~ Trip 3 00:18:20 00:33:20 ~ 2 ~ Egress 5m [00:16:40 00:38:20 21m40s Tx0 $1300.00]"
    );
}
