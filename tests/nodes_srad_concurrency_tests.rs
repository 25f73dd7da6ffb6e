mod common;

use common::*;
use sonotab::core::{ElementType, Extent3, Message, ProcessingNode};
use sonotab::engine::{BackpressurePolicy, GateState};
use sonotab::nodes::SradNode;
use sonotab::registry::ParamValue;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        thread::sleep(Duration::from_millis(1));
    }
}

fn frame(value: f64) -> Message {
    Message::from(image_with_value(ElementType::Float32, Extent3::plane(4, 4), value, value, value))
}

#[test]
fn test_apply_all_is_never_observed_half_done() {
    let node = Arc::new(
        SradNode::new("srad", BackpressurePolicy::Queueing, SpyTransform::default(), &defaults()).unwrap(),
    );

    let mut low = defaults();
    low.set("lambda", ParamValue::Float(0.25));
    low.set("speckleScale", ParamValue::Float(0.25));
    let mut high = defaults();
    high.set("lambda", ParamValue::Float(1.75));
    high.set("speckleScale", ParamValue::Float(1.75));

    let reconfigure = {
        let node = node.clone();
        thread::spawn(move || {
            for i in 0..500 {
                let source = if i % 2 == 0 { &low } else { &high };
                node.apply_all(source).unwrap();
            }
        })
    };

    let tweak = {
        let node = node.clone();
        thread::spawn(move || {
            let mut source = defaults();
            for i in 0..500u32 {
                source.set("numberIterations", ParamValue::Integer(i % 1000));
                node.apply_one("numberIterations", &source);
            }
        })
    };

    let submitters: Vec<_> = (0..4)
        .map(|_| {
            let node = node.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    assert!(node.submit(Some(frame(f64::from(i)))).is_some());
                }
            })
        })
        .collect();

    reconfigure.join().unwrap();
    tweak.join().unwrap();
    for submitter in submitters {
        submitter.join().unwrap();
    }

    let params = node.transform().params();
    assert_eq!(params.len(), 400);
    for p in params {
        assert_eq!(p.lambda, p.speckle_scale, "torn configuration: {:?}", p);
    }
}

#[test]
fn test_discarding_node_drops_frame_while_busy() {
    let node = Arc::new(
        SradNode::new(
            "srad",
            BackpressurePolicy::Discarding,
            SpyTransform::slow(Duration::from_millis(200)),
            &defaults(),
        )
        .unwrap(),
    );

    let first = {
        let node = node.clone();
        thread::spawn(move || node.submit(Some(frame(1.0))))
    };
    wait_until("first frame to start", || node.gate_state() == GateState::Processing);

    assert!(node.submit(Some(frame(2.0))).is_none());
    assert_eq!(node.metrics().frames_dropped(), 1);
    assert_eq!(node.metrics().errors_count(), 0);

    let output = first.join().unwrap().unwrap().into_image().unwrap();
    assert_eq!(output.sync_timestamp(), 1.0);
    assert_eq!(node.transform().first_samples(), vec![1.0]);
    assert_eq!(node.gate_state(), GateState::Idle);

    // Free again once the first frame is done
    assert!(node.submit(Some(frame(3.0))).is_some());
}

#[test]
fn test_queueing_node_processes_waiting_frames_in_order() {
    let node = Arc::new(
        SradNode::new(
            "srad",
            BackpressurePolicy::Queueing,
            SpyTransform::slow(Duration::from_millis(100)),
            &defaults(),
        )
        .unwrap(),
    );

    let first = {
        let node = node.clone();
        thread::spawn(move || node.submit(Some(frame(1.0))))
    };
    wait_until("first frame to start", || node.gate_state() == GateState::Processing);

    let second = {
        let node = node.clone();
        thread::spawn(move || node.submit(Some(frame(2.0))))
    };

    let first = first.join().unwrap().unwrap().into_image().unwrap();
    let second = second.join().unwrap().unwrap().into_image().unwrap();

    assert_eq!(first.sync_timestamp(), 1.0);
    assert_eq!(second.sync_timestamp(), 2.0);
    assert_eq!(node.transform().first_samples(), vec![1.0, 2.0]);
    assert_eq!(node.metrics().frames_processed(), 2);
    assert_eq!(node.metrics().frames_dropped(), 0);
}

#[test]
fn test_reconfiguration_waits_for_in_flight_frame() {
    let node = Arc::new(
        SradNode::new(
            "srad",
            BackpressurePolicy::Queueing,
            SpyTransform::slow(Duration::from_millis(150)),
            &defaults(),
        )
        .unwrap(),
    );

    let in_flight = {
        let node = node.clone();
        thread::spawn(move || node.submit(Some(frame(1.0))))
    };
    wait_until("frame to start", || node.gate_state() == GateState::Processing);

    let mut source = defaults();
    source.set("lambda", ParamValue::Float(0.5));
    node.apply_one("lambda", &source);

    // The update could only land after the frame released the gate
    assert_eq!(node.gate_state(), GateState::Idle);
    in_flight.join().unwrap().unwrap();
    assert_eq!(node.transform().params()[0].lambda, 1.0);
    assert_eq!(node.config().lambda, 0.5);
}
