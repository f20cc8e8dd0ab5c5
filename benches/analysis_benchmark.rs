//! Benchmark for the analysis pipeline
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use control_analyzer::model::SystemModel;
use control_analyzer::{frequency, pid, response, Analysis};

fn make_pid_model() -> SystemModel {
    SystemModel::pid(1.0, 1.0, 1.0, 0.5, 0.1).unwrap()
}

/// One law evaluation should stay in the nanosecond range; the closed-loop simulation calls it a
/// thousand times per refresh.
fn bench_func_pid(c: &mut Criterion) {
    let pid = pid::FuncPidController::new(pid::PidGains::new(1.0, 0.5, 0.1), 0.01);
    let mut ctx = pid::PidContext::<f64>::new();
    let setpoint = 1.0;
    let mut measurement = 0.9;
    let mut output: f64 = 0.0;

    c.bench_function("functional PID", |b| {
        b.iter(|| {
            (output, ctx) = pid.compute(ctx, black_box(measurement), black_box(setpoint));
            measurement += 0.0001; // prevent constant inputs
            black_box(output);
        });
    });
}

fn bench_step_response(c: &mut Criterion) {
    let second_order = SystemModel::second_order(2.0, 0.7).unwrap();
    let pid = make_pid_model();

    c.bench_function("closed-form step response", |b| {
        b.iter(|| black_box(response::step_response(black_box(&second_order))));
    });
    c.bench_function("PID loop step response", |b| {
        b.iter(|| black_box(response::step_response(black_box(&pid))));
    });
}

fn bench_frequency(c: &mut Criterion) {
    let model = SystemModel::second_order(2.0, 0.7).unwrap();

    c.bench_function("bode", |b| {
        b.iter(|| black_box(frequency::bode(black_box(&model))));
    });
    c.bench_function("nyquist", |b| {
        b.iter(|| black_box(frequency::nyquist(black_box(&model))));
    });
}

// A full refresh is what a front end pays on every parameter change, so it has to stay well
// below a frame.
fn bench_refresh(c: &mut Criterion) {
    let second_order = SystemModel::second_order(2.0, 0.7).unwrap();
    let pid = make_pid_model();

    c.bench_function("refresh second order", |b| {
        b.iter(|| black_box(Analysis::refresh(black_box(&second_order)).unwrap()));
    });
    c.bench_function("refresh PID", |b| {
        b.iter(|| black_box(Analysis::refresh(black_box(&pid)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_func_pid,
    bench_step_response,
    bench_frequency,
    bench_refresh,
);
criterion_main!(benches);
