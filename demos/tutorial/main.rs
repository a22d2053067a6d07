//! Walks through building a `Context` by hand, running it tick-by-tick, and
//! inspecting the trajectory — the same steps `run_sim` performs for the
//! production fixture, spelled out for a map small enough to follow.

use agv_fleet_sim_core::config::SimConfig;
use agv_fleet_sim_core::context::Context;
use agv_fleet_sim_core::geom::{Direction, Point};
use agv_fleet_sim_core::map_element::{ElementKind, MapElement};
use agv_fleet_sim_core::task::{Priority, TaskRecord};
use agv_fleet_sim_core::validator::validate;
use agv_fleet_sim_core::verbose::{init_logger, set_verbose_level, VerboseLevel};

fn main() {
    init_logger();
    set_verbose_level(VerboseLevel::Main);

    // ==============================================================
    // STEP 1: LAY OUT THE MAP
    // ==============================================================
    // One start point, one end point, one AGV, all on row y=5:
    //
    //   SP01(2,5) ... AGV01(5,5) --------------------> EP01(18,5)

    let map_elements = vec![
        MapElement::new(ElementKind::StartPoint, "SP01", Point::new(2, 5), None),
        MapElement::new(ElementKind::EndPoint, "EP01", Point::new(18, 5), None),
        MapElement::new(ElementKind::Agv, "AGV01", Point::new(5, 5), Some(Direction::Right)),
    ];

    // ==============================================================
    // STEP 2: DEFINE THE TASK
    // ==============================================================

    let task_records = vec![TaskRecord {
        external_id: "T0001".to_string(),
        start_point_name: "SP01".to_string(),
        end_point_name: "EP01".to_string(),
        priority: Priority::Normal,
        deadline: None,
    }];

    // ==============================================================
    // STEP 3: BUILD THE CONTEXT
    // ==============================================================
    // `Context::new` derives the usable bounds and obstacle ring from the
    // map elements, and builds one `Agv`/`Task` per row.

    let mut ctx = Context::new(map_elements, task_records, SimConfig::default()).expect("valid map and tasks");

    println!("bounds: {:?}", ctx.bounds);
    println!("fixed obstacles: {}", ctx.fixed_obstacles.len());

    // ==============================================================
    // STEP 4: RUN TO COMPLETION
    // ==============================================================

    ctx.process_to_complete().expect("this tiny fixture always converges");

    println!("completed after {} ticks", ctx.timestamp);
    for task in &ctx.tasks {
        println!("  {} duration={:?}", task.id, task.duration());
    }

    // ==============================================================
    // STEP 5: VALIDATE THE RECORDED TRAJECTORY
    // ==============================================================

    let violations = validate(&ctx.recorder, &ctx.map_elements, &ctx.tasks, ctx.config.grid_size);
    println!("recorded {} rows, {} violations", ctx.recorder.rows().len(), violations.len());
    for v in &violations {
        println!("  {v}");
    }
}
