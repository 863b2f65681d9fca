// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use lumen_core::config::TextureDefaults;
use lumen_core::math::{Extent2D, Origin2D};
use lumen_core::renderer::{
    CubeFace, DataType, DecodedImage, FilterType, ImageTarget, MinFilter, MipmapHint, PixelFormat,
    Texture, TextureData, TextureError, TextureHandle, TextureKind, TextureParameter, TextureState,
    TextureTarget, ValidationReason, WrapAxis, WrapMode,
};
use lumen_infra::{RecordingContext, TextureCall};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rgba_faces(size: u32) -> [TextureData; 6] {
    std::array::from_fn(|i| {
        TextureData::from_buffer(
            vec![i as u8; (size * size * 4) as usize],
            Extent2D::new(size, size),
            PixelFormat::Rgba,
            DataType::UnsignedByte,
        )
    })
}

fn image_faces(size: u32) -> [TextureData; 6] {
    std::array::from_fn(|_| {
        TextureData::from_image(DecodedImage::rgb8(
            size,
            size,
            vec![0u8; (size * size * 3) as usize],
        ))
    })
}

fn uploaded_targets(ctx: &RecordingContext) -> Vec<ImageTarget> {
    ctx.calls()
        .iter()
        .filter_map(|call| match call {
            TextureCall::TexImage { target, .. } | TextureCall::TexImageDecoded { target, .. } => {
                Some(*target)
            }
            _ => None,
        })
        .collect()
}

#[test]
fn cube_map_faces_upload_in_canonical_order() {
    init_logging();
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(8));

    let handle = sky.allocate(&mut ctx).unwrap();

    let expected: Vec<_> = CubeFace::ALL.iter().copied().map(ImageTarget::CubeFace).collect();
    assert_eq!(uploaded_targets(&ctx), expected);
    assert_eq!(
        ctx.calls().first(),
        Some(&TextureCall::CreateTexture(handle))
    );
    assert_eq!(
        ctx.calls().last(),
        Some(&TextureCall::Bind {
            target: TextureTarget::CubeMap,
            handle: None,
        })
    );
    assert_eq!(ctx.bound(TextureTarget::CubeMap), None);
}

#[test]
fn raw_faces_upload_with_texture_extent_and_face_format() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(4));

    sky.allocate(&mut ctx).unwrap();

    let uploads: Vec<_> = ctx
        .calls()
        .iter()
        .filter(|call| call.is_upload())
        .collect();
    assert_eq!(uploads.len(), 6);
    for call in uploads {
        assert!(matches!(
            call,
            TextureCall::TexImage {
                extent: Extent2D { width: 4, height: 4 },
                pixel_format: PixelFormat::Rgba,
                data_type: DataType::UnsignedByte,
                len: 64,
                ..
            }
        ));
    }
}

#[test]
fn nicest_hint_precedes_every_face_and_mipmaps_follow_the_last() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", image_faces(2));

    sky.allocate(&mut ctx).unwrap();

    let calls = ctx.calls();
    let hints = calls
        .iter()
        .filter(|call| **call == TextureCall::MipmapHint(MipmapHint::Nicest))
        .count();
    assert_eq!(hints, 6);
    for (i, call) in calls.iter().enumerate() {
        if call.is_upload() {
            assert_eq!(calls[i - 1], TextureCall::MipmapHint(MipmapHint::Nicest));
        }
    }

    let mipmaps: Vec<_> = calls
        .iter()
        .enumerate()
        .filter(|(_, call)| matches!(call, TextureCall::GenerateMipmap(_)))
        .map(|(i, _)| i)
        .collect();
    let last_upload = calls.iter().rposition(TextureCall::is_upload).unwrap();
    assert_eq!(mipmaps, vec![last_upload + 1]);
}

#[test]
fn trilinear_without_mipmaps_degrades_to_linear() {
    init_logging();
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));
    sky.set_filter(FilterType::Trilinear);
    sky.set_mipmapped(false);

    sky.allocate(&mut ctx).unwrap();

    assert!(ctx.calls().contains(&TextureCall::SetParameter {
        target: TextureTarget::CubeMap,
        parameter: TextureParameter::MinFilter(MinFilter::Linear),
    }));
    assert!(!ctx
        .calls()
        .iter()
        .any(|call| matches!(call, TextureCall::GenerateMipmap(_))));
}

#[test]
fn cube_maps_clamp_both_axes_by_default() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));

    sky.allocate(&mut ctx).unwrap();

    for axis in [WrapAxis::S, WrapAxis::T] {
        assert!(ctx.calls().contains(&TextureCall::SetParameter {
            target: TextureTarget::CubeMap,
            parameter: TextureParameter::Wrap(axis, WrapMode::ClampToEdge),
        }));
    }
}

#[test]
fn configured_defaults_reach_the_backend() {
    init_logging();
    let mut ctx = RecordingContext::new().with_max_anisotropy(4.0);
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));
    sky.apply_defaults(&TextureDefaults {
        filter: FilterType::Nearest,
        mipmap: false,
        max_anisotropy: 16.0,
        wrap_s: Some(WrapMode::Repeat),
        wrap_t: None,
        recycle: true,
    });

    sky.allocate(&mut ctx).unwrap();

    let parameters: Vec<_> = ctx
        .calls()
        .iter()
        .filter_map(|call| match call {
            TextureCall::SetParameter { parameter, .. } => Some(*parameter),
            _ => None,
        })
        .collect();
    assert!(parameters.contains(&TextureParameter::MinFilter(MinFilter::Nearest)));
    assert!(parameters.contains(&TextureParameter::MaxAnisotropy(4.0)));
    assert!(parameters.contains(&TextureParameter::Wrap(WrapAxis::S, WrapMode::Repeat)));
    assert!(parameters.contains(&TextureParameter::Wrap(WrapAxis::T, WrapMode::ClampToEdge)));
    assert!(sky.texture_data().is_none());
}

#[test]
fn validation_failures_issue_no_backend_calls() {
    let mut ctx = RecordingContext::new();

    let mut no_data = Texture::cube_map("empty");
    let mut short = Texture::cube_map("short");
    short.set_faces(rgba_faces(2).into_iter().take(5));
    let mut destroyed = Texture::cube_map("destroyed");
    let mut faces = rgba_faces(2);
    faces[0].destroy();
    destroyed.set_faces(faces);

    for texture in [&mut no_data, &mut short, &mut destroyed] {
        let err = texture.allocate(&mut ctx).unwrap_err();
        assert!(err.validation_reason().is_some(), "{err}");
        assert_eq!(texture.state(), TextureState::Unallocated);
    }
    assert!(ctx.calls().is_empty());
}

#[test]
fn faces_shorter_than_their_extent_are_rejected_up_front() {
    let mut ctx = RecordingContext::new();

    let mut raw = Texture::cube_map("raw");
    raw.set_extent(Extent2D::new(64, 64));
    raw.set_faces((0..6).map(|_| {
        TextureData::from_buffer(
            vec![0u8; 16],
            Extent2D::default(),
            PixelFormat::Rgba,
            DataType::UnsignedByte,
        )
    }));
    let mut decoded = Texture::cube_map_with_faces(
        "decoded",
        std::array::from_fn(|_| {
            TextureData::from_image(DecodedImage::rgba8(64, 64, vec![0u8; 4]))
        }),
    );

    for texture in [&mut raw, &mut decoded] {
        let err = texture.allocate(&mut ctx).unwrap_err();
        assert!(
            matches!(
                err.validation_reason(),
                Some(ValidationReason::BufferTooSmall { .. })
            ),
            "{err}"
        );
        assert_eq!(texture.state(), TextureState::Unallocated);
    }
    assert!(ctx.calls().is_empty());
}

#[test]
fn replace_rewrites_every_face_in_place() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(4));
    let handle = sky.allocate(&mut ctx).unwrap();
    ctx.take_calls();

    sky.set_faces(rgba_faces(4));
    sky.replace(&mut ctx).unwrap();

    let calls = ctx.calls();
    assert_eq!(
        calls.first(),
        Some(&TextureCall::Bind {
            target: TextureTarget::CubeMap,
            handle: Some(handle),
        })
    );
    let subs: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            TextureCall::TexSubImage { target, origin, extent, .. } => {
                Some((*target, *origin, *extent))
            }
            _ => None,
        })
        .collect();
    assert_eq!(subs.len(), 6);
    for (i, (target, origin, extent)) in subs.into_iter().enumerate() {
        assert_eq!(target, ImageTarget::CubeFace(CubeFace::ALL[i]));
        assert_eq!(origin, Origin2D::ZERO);
        assert_eq!(extent, Extent2D::new(4, 4));
    }
    assert!(!calls.iter().any(|call| matches!(call, TextureCall::SetParameter { .. })));
    assert_eq!(sky.state(), TextureState::Allocated(handle));
}

#[test]
fn replace_with_decoded_faces_uses_recorded_format() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", image_faces(2));
    sky.allocate(&mut ctx).unwrap();
    ctx.take_calls();

    sky.set_faces(image_faces(2));
    sky.replace(&mut ctx).unwrap();

    assert!(ctx.calls().iter().all(|call| !matches!(
        call,
        TextureCall::TexSubImageDecoded { texel_format, .. } if *texel_format != PixelFormat::Rgb
    )));
    assert_eq!(
        ctx.calls()
            .iter()
            .filter(|call| matches!(call, TextureCall::TexSubImageDecoded { .. }))
            .count(),
        6
    );
}

#[test]
fn replace_rejects_a_resized_face() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(4));
    sky.allocate(&mut ctx).unwrap();
    ctx.take_calls();

    sky.set_faces(rgba_faces(2));
    let err = sky.replace(&mut ctx).unwrap_err();

    assert!(matches!(
        err.validation_reason(),
        Some(ValidationReason::SizeMismatch { .. })
    ));
    assert!(ctx.calls().is_empty());
}

#[test]
fn refused_handle_is_an_allocation_error() {
    let mut ctx = RecordingContext::new();
    ctx.refuse_handles();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));

    let err = sky.allocate(&mut ctx).unwrap_err();

    assert!(matches!(err, TextureError::Allocation { .. }));
    assert_eq!(sky.state(), TextureState::Unallocated);
}

#[test]
fn partial_upload_is_left_for_the_caller_to_destroy() {
    init_logging();
    let mut ctx = RecordingContext::new();
    ctx.fail_upload_at(3);
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));

    let err = sky.allocate(&mut ctx).unwrap_err();

    assert!(matches!(err, TextureError::Allocation { .. }));
    let TextureState::Failed(handle) = sky.state() else {
        panic!("expected a failed texture, got {:?}", sky.state());
    };
    assert!(ctx.is_live(handle));
    assert_eq!(uploaded_targets(&ctx).len(), 3);
    assert_eq!(ctx.bound(TextureTarget::CubeMap), None);

    sky.destroy(&mut ctx).unwrap();
    assert!(!ctx.is_live(handle));
    assert_eq!(sky.state(), TextureState::Destroyed);
}

#[test]
fn layered_texture_uploads_each_layer() {
    let mut ctx = RecordingContext::new();
    let mut atlas = Texture::new("atlas", TextureKind::Multi(2));
    atlas.set_faces(rgba_faces(2).into_iter().take(2));

    atlas.allocate(&mut ctx).unwrap();

    assert!(ctx.calls().contains(&TextureCall::AllocateLayers {
        texel_format: PixelFormat::Rgba,
        extent: Extent2D::new(2, 2),
        layers: 2,
    }));
    assert_eq!(
        uploaded_targets(&ctx),
        vec![ImageTarget::Layer(0), ImageTarget::Layer(1)]
    );
}

#[test]
fn duplicate_allocates_independently() {
    let mut ctx = RecordingContext::new();
    let mut sky = Texture::cube_map_with_faces("sky", rgba_faces(2));
    let mut copy = sky.duplicate();

    let a = sky.allocate(&mut ctx).unwrap();
    let b = copy.allocate(&mut ctx).unwrap();

    assert_ne!(a, b);
    assert_eq!(b, TextureHandle(2));
}
