use std::sync::Arc;

use codspeed_criterion_compat::{black_box, criterion_group, criterion_main, Criterion};
use skypad_device::Drone;
use skypad_workspace::{MapperSettings, Profile};
use skypadd::app::{AxisId, StickMapper, StickSide};

struct NullDrone;

impl Drone for NullDrone {
    fn forward(&self, m: u8) {
        black_box(m);
    }
    fn backward(&self, m: u8) {
        black_box(m);
    }
    fn left(&self, m: u8) {
        black_box(m);
    }
    fn right(&self, m: u8) {
        black_box(m);
    }
    fn up(&self, m: u8) {
        black_box(m);
    }
    fn down(&self, m: u8) {
        black_box(m);
    }
    fn clockwise(&self, m: u8) {
        black_box(m);
    }
    fn counter_clockwise(&self, m: u8) {
        black_box(m);
    }
    fn take_off(&self) {}
    fn land(&self) {}
}

pub fn bench_mapper_tick(c: &mut Criterion) {
    let profile = Profile::default();
    let mapper = StickMapper::new(
        &MapperSettings::default(),
        profile.buttons,
        Arc::new(NullDrone),
    );

    // Sweep both sticks through the full range
    c.bench_function("mapper_tick", |b| {
        b.iter(|| {
            let mut n = 0usize;
            for step in -16i32..16 {
                let raw = i16::try_from((step * 2048).clamp(-32767, 32767)).unwrap_or(0);
                mapper.on_axis_update(AxisId::LeftX, raw);
                mapper.on_axis_update(AxisId::LeftY, -raw);
                mapper.on_axis_update(AxisId::RightX, raw / 2);
                mapper.on_axis_update(AxisId::RightY, raw);
                for side in [StickSide::Left, StickSide::Right] {
                    let commands = mapper.tick(side);
                    n += usize::from(commands[0].magnitude) + usize::from(commands[1].magnitude);
                }
            }
            black_box(n)
        })
    });
}

criterion_group!(benches, bench_mapper_tick);
criterion_main!(benches);
