//! Error Types
//!
//! This module defines the error type shared by every part of the playground.
//!
//! # Overview
//!
//! [`Error`] covers the failure modes the demos can run into:
//! - GPU adapter, device and surface creation
//! - Asset I/O, image decoding and glTF parsing
//! - Invalid animation data
//!
//! All fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type of the playground.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // GPU & Windowing Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface is not supported by the selected adapter.
    #[error("Surface not supported by adapter {0}")]
    SurfaceUnsupported(String),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// A GPU resource was requested before the renderer was initialized.
    #[error("Renderer is not initialized")]
    RendererNotInitialized,

    /// Window creation error (winit).
    #[error("Window creation error: {0}")]
    WindowCreate(#[from] winit::error::OsError),

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// File I/O error, with the path that failed.
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Image decoding failed.
    #[error("Failed to decode image {path:?}: {source}")]
    ImageDecode {
        /// Path of the image
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: image::ImageError,
    },

    /// The six faces of a cube map are inconsistent.
    #[error("Invalid cube map: {0}")]
    CubeMap(String),

    /// glTF parsing or validation failed.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// A glTF file uses data this loader does not understand.
    #[error("Unsupported glTF content: {0}")]
    UnsupportedGltf(String),

    /// A background loader hung up before delivering its result.
    #[error("Loader for {0:?} disconnected before completing")]
    LoaderDisconnected(PathBuf),

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// Keyframe data is malformed.
    #[error("Invalid keyframe track: {0}")]
    InvalidTrack(String),
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
