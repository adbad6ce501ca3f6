//! Error types for the presentation shell.
//!
//! The simulation itself never fails; only the window and GPU setup can.
//! Per-frame surface hiccups are contained inside the shell and never
//! surface here.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed effect.
#[derive(Debug)]
pub enum EffectError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::EventLoop(e) => write!(f, "Failed to run event loop: {}", e),
            EffectError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectError::EventLoop(e) => Some(e),
            EffectError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for EffectError {
    fn from(e: winit::error::EventLoopError) -> Self {
        EffectError::EventLoop(e)
    }
}

impl From<GpuError> for EffectError {
    fn from(e: GpuError) -> Self {
        EffectError::Gpu(e)
    }
}
