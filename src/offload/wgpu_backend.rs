//! Minimal `wgpu` compute-shader path for batch area reduction on large
//! batches, compiled only under `offload-wgpu`.
//!
//! This is a CPU-orchestrated dispatch: a device and queue are acquired
//! per call rather than cached, since offload is meant for the rare
//! very-large batch rather than per-frame use.

use wgpu::util::DeviceExt;

use super::OffloadBackend;
use crate::batch::PolygonBatch;
use crate::point::Area;

pub struct WgpuBackend;

impl WgpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OffloadBackend for WgpuBackend {
    fn area_batch(&self, batch: &PolygonBatch) -> Vec<Area> {
        area_batch_offload(batch)
    }
}

const SHADER_SOURCE: &str = r#"
struct Vertex {
    x: i32,
    y: i32,
}

struct IndexEntry {
    start: u32,
    length: u32,
}

@group(0) @binding(0) var<storage, read> vertices: array<Vertex>;
@group(0) @binding(1) var<storage, read> index: array<IndexEntry>;
@group(0) @binding(2) var<storage, read_write> areas: array<i32>;

@compute @workgroup_size(64)
fn main(@builtin(global_invocation_id) gid: vec3<u32>) {
    let member = gid.x;
    if (member >= arrayLength(&index)) {
        return;
    }
    let entry = index[member];
    var sum: i32 = 0;
    if (entry.length >= 3u) {
        for (var i: u32 = 0u; i < entry.length; i = i + 1u) {
            let current = vertices[entry.start + i];
            let next = vertices[entry.start + (i + 1u) % entry.length];
            sum = sum + (current.x * next.y - current.y * next.x);
        }
    }
    areas[member] = sum;
}
"#;

/// Computes every member's signed area on the GPU. Falls back silently to
/// nothing useful for batches this code path isn't meant for; callers in
/// [`crate::dispatch`] only route here once a batch clears the offload
/// size threshold.
pub fn area_batch_offload(batch: &PolygonBatch) -> Vec<Area> {
    pollster::block_on(area_batch_offload_async(batch))
}

async fn area_batch_offload_async(batch: &PolygonBatch) -> Vec<Area> {
    let member_count = batch.len();
    if member_count == 0 {
        return Vec::new();
    }

    let instance = wgpu::Instance::default();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .expect("no suitable GPU adapter for offload");
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await
        .expect("failed to open GPU device for offload");

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct GpuIndexEntry {
        start: u32,
        length: u32,
    }

    let gpu_index: Vec<GpuIndexEntry> = (0..member_count)
        .map(|m| {
            let entry = batch.index_entry(m);
            GpuIndexEntry {
                start: entry.start as u32,
                length: entry.length as u32,
            }
        })
        .collect();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("apex-polygon vertices"),
        contents: bytemuck::cast_slice(batch.raw_vertices()),
        usage: wgpu::BufferUsages::STORAGE,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("apex-polygon index"),
        contents: bytemuck::cast_slice(&gpu_index),
        usage: wgpu::BufferUsages::STORAGE,
    });
    let output_size = (member_count * std::mem::size_of::<i32>()) as u64;
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("apex-polygon areas"),
        size: output_size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });
    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("apex-polygon areas staging"),
        size: output_size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("apex-polygon area reduction"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    });
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("apex-polygon area pipeline"),
        layout: None,
        module: &shader,
        entry_point: "main",
        compilation_options: Default::default(),
        cache: None,
    });
    let bind_group_layout = pipeline.get_bind_group_layout(0);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("apex-polygon area bind group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: vertex_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: index_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: output_buffer.as_entire_binding(),
            },
        ],
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("apex-polygon area encoder"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("apex-polygon area pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        let workgroups = member_count.div_ceil(64) as u32;
        pass.dispatch_workgroups(workgroups, 1, 1);
    }
    encoder.copy_buffer_to_buffer(&output_buffer, 0, &staging_buffer, 0, output_size);
    queue.submit(Some(encoder.finish()));

    let slice = staging_buffer.slice(..);
    let (sender, receiver) = futures_intrusive_channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    device.poll(wgpu::Maintain::Wait);
    receiver
        .recv()
        .expect("offload map channel closed")
        .expect("failed to map offload output buffer");

    let data = slice.get_mapped_range();
    let areas: Vec<i32> = bytemuck::cast_slice(&data).to_vec();
    drop(data);
    staging_buffer.unmap();

    areas.into_iter().map(Area::from).collect()
}

/// A one-shot synchronous rendezvous channel, since pulling in a full
/// async-channel dependency for a single GPU readback isn't worth it.
fn futures_intrusive_channel<T: Send + 'static>() -> (
    std::sync::mpsc::Sender<T>,
    std::sync::mpsc::Receiver<T>,
) {
    std::sync::mpsc::channel()
}
