use agv_fleet_sim_core::config::SimConfig;
use agv_fleet_sim_core::context::Context;
use agv_fleet_sim_core::io::{parse_map_csv, parse_task_csv, write_trajectory_csv};

const MAP_CSV: &str = "type,name,x,y,pitch\n\
start_point,SP01,2,5,\n\
end_point,EP01,18,5,\n\
agv,AGV01,5,5,0\n";

const TASK_CSV: &str = "id,start_point,end_point,priority,deadline\n\
1,SP01,EP01,normal,\n";

#[test]
fn parsed_map_and_tasks_build_a_context_that_completes() {
    let map_elements = parse_map_csv(MAP_CSV).unwrap();
    let task_records = parse_task_csv(TASK_CSV).unwrap();

    let mut ctx = Context::new(map_elements, task_records, SimConfig::default()).unwrap();
    ctx.process_to_complete().unwrap();

    assert!(ctx.all_tasks_completed());
}

#[test]
fn exported_trajectory_has_one_header_and_at_least_one_row_per_tick() {
    let map_elements = parse_map_csv(MAP_CSV).unwrap();
    let task_records = parse_task_csv(TASK_CSV).unwrap();

    let mut ctx = Context::new(map_elements, task_records, SimConfig::default()).unwrap();
    ctx.process_to_complete().unwrap();

    let csv = write_trajectory_csv(&ctx.recorder);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,name,X,Y,pitch,loaded,destination,Emergency,id");
    assert_eq!(lines.len() as u32 - 1, ctx.timestamp + 1); // tick 0 snapshot + one row per tick thereafter
}
