use {
    crate::{
        client::{ClientError, ErrorClass, RequestError},
        config::CoreConfig,
        format::Argb8888,
        ifs::{
            wl_buffer::{WlBuffer, WlBufferError},
            wl_callback::WlCallback,
            wl_compositor::WlCompositor,
            wl_seat::wl_keyboard::WlKeyboard,
            wl_shm::WlShm,
            wl_shm_pool::WlShmPool,
            wl_surface::WlSurface,
        },
        it::{test_client::TestClient, test_error::TestResult, test_mem::TestMem},
        object::{ObjectId, Version, WL_DISPLAY_ID},
        wire::{
            WlBufferId, WlCallbackId, WlKeyboardId, WlPointerId, WlRegionId, WlShmPoolId,
            WlSurfaceId, wl_buffer, wl_callback, wl_compositor, wl_display, wl_keyboard,
            wl_region, wl_seat, wl_shm, wl_shm_pool, wl_surface,
        },
    },
    std::rc::Rc,
};

const ARGB8888: u32 = 0;
const XRGB8888: u32 = 1;

#[test]
fn end_to_end_commit() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(4096)?;
    let buffer = tc.create_buffer(pool, 0, 64, 16, 256, ARGB8888)?;
    let surface = tc.create_surface()?;
    tc.send(
        surface,
        wl_surface::Attach {
            buffer,
            x: 0,
            y: 0,
        },
    )?;
    tc.send(
        surface,
        wl_surface::Damage {
            x: 0,
            y: 0,
            width: 64,
            height: 16,
        },
    )?;
    tc.send(surface, wl_surface::Commit {})?;
    let surface = tc.surface(surface)?;
    tassert_eq!(surface.pending_states(), 1);
    let Some(state) = surface.pop_state() else {
        bail!("no state was committed");
    };
    tassert_eq!(surface.pop_state().is_none(), true);
    tassert_eq!(state.buffer_damage.rectangles(), vec![(0, 0, 64, 16)]);
    let Some(attached) = &state.buffer else {
        bail!("the snapshot has no buffer");
    };
    tassert_eq!(Rc::ptr_eq(attached, &tc.get::<WlBuffer>(buffer)?), true);
    Ok(())
}

#[test]
fn create_is_idempotent() -> TestResult {
    let tc = TestClient::new()?;
    let compositor = tc.compositor()?;
    let first = tc.get::<WlCompositor>(compositor)?;
    let second = WlCompositor::bind(&tc.client, compositor, 1)?;
    tassert_eq!(Rc::ptr_eq(&first, &second), true);

    let surface = tc.create_surface()?;
    let a = tc.surface(surface)?;
    tc.send(compositor, wl_compositor::CreateSurface { id: surface })?;
    let b = tc.surface(surface)?;
    tassert_eq!(Rc::ptr_eq(&a, &b), true);

    let mut called = false;
    let c = tc.client.objects.create(surface, || {
        called = true;
        WlSurface::new(surface, &tc.client, Version(1))
    })?;
    tassert_eq!(called, false);
    tassert_eq!(Rc::ptr_eq(&a, &c), true);
    Ok(())
}

#[test]
fn ids_are_validated() -> TestResult {
    let tc = TestClient::new()?;
    let compositor = tc.compositor()?;
    let res = tc.send(
        compositor,
        wl_compositor::CreateRegion {
            id: WlRegionId::from_raw(compositor.raw()),
        },
    );
    let Err(ClientError::ObjectError(e)) = res else {
        bail!("binding a region to the compositor id succeeded");
    };
    tassert_eq!(e.class, ErrorClass::ProtocolViolation);
    tassert_eq!(e.display_code, wl_display::INVALID_OBJECT);

    let tc = TestClient::new()?;
    let compositor = tc.compositor()?;
    let res = tc.send(
        compositor,
        wl_compositor::CreateRegion {
            id: WlRegionId::from_raw(0xff00_0001),
        },
    );
    if res.is_ok() {
        bail!("a server id was accepted");
    }
    Ok(())
}

#[test]
fn lookup_before_create_is_not_bound() -> TestResult {
    let tc = TestClient::new()?;
    let id = WlBufferId::from_raw(77);
    let Err(ClientError::NotBound(e)) = tc.client.lookup::<WlBuffer>(id) else {
        bail!("lookup of an unbound id succeeded");
    };
    tassert_eq!(e.id, ObjectId::from(id));
    tassert_eq!(e.interface, crate::wire::wl_buffer::INTERFACE);
    Ok(())
}

#[test]
fn attach_of_unbound_buffer_kills_the_client() -> TestResult {
    let tc = TestClient::new()?;
    let surface = tc.create_surface()?;
    let res = tc.send(
        surface,
        wl_surface::Attach {
            buffer: WlBufferId::from_raw(1000),
            x: 0,
            y: 0,
        },
    );
    let Err(e) = res else {
        bail!("attach succeeded");
    };
    tassert_eq!(e.is_fatal(), false);
    tassert_eq!(tc.client.is_killed(), true);
    let events = tc.events();
    let Some(error) = events.error() else {
        bail!("no error was posted");
    };
    tassert_eq!(error.object_id, WL_DISPLAY_ID);
    tassert_eq!(error.code, wl_display::INVALID_OBJECT);
    let res = tc.send(surface, wl_surface::Commit {});
    let Err(ClientError::Killed(_)) = res else {
        bail!("a killed client could still send requests");
    };
    Ok(())
}

#[test]
fn unknown_object_is_invalid() -> TestResult {
    let tc = TestClient::new()?;
    let res = tc.send(WlSurfaceId::from_raw(42), wl_surface::Commit {});
    let Err(ClientError::InvalidObject(id)) = res else {
        bail!("request to an unknown object succeeded");
    };
    tassert_eq!(id, ObjectId::from_raw(42));
    let events = tc.events();
    let Some(error) = events.error() else {
        bail!("no error was posted");
    };
    tassert_eq!(error.code, wl_display::INVALID_OBJECT);
    Ok(())
}

#[test]
fn mismatched_request_is_invalid_method() -> TestResult {
    let tc = TestClient::new()?;
    let surface = tc.create_surface()?;
    let res = tc.send(surface, wl_region::Destroy {});
    let Err(ClientError::InvalidMethod { method, .. }) = res else {
        bail!("a wl_region request was accepted by a wl_surface");
    };
    tassert_eq!(method, "destroy");
    let events = tc.events();
    let Some(error) = events.error() else {
        bail!("no error was posted");
    };
    tassert_eq!(error.code, wl_display::INVALID_METHOD);
    Ok(())
}

#[test]
fn shm_advertises_formats_once() -> TestResult {
    let tc = TestClient::new()?;
    let shm = tc.shm()?;
    WlShm::bind(&tc.client, shm, 2)?;
    let events = tc.events();
    let formats: Vec<_> = events
        .of::<wl_shm::Format>()
        .iter()
        .map(|f| f.format)
        .collect();
    tassert_eq!(formats, vec![ARGB8888, XRGB8888]);
    Ok(())
}

#[test]
fn pool_size_must_be_positive() -> TestResult {
    let tc = TestClient::new()?;
    let mem = TestMem::new(16)?;
    if tc.create_pool_from(&mem, 0).is_ok() {
        bail!("an empty pool was created");
    }
    let events = tc.events();
    let Some(error) = events.error() else {
        bail!("no error was posted");
    };
    tassert_eq!(error.code, wl_shm::INVALID_STRIDE);
    Ok(())
}

#[test]
fn pool_size_is_limited_by_config() -> TestResult {
    let config = CoreConfig::parse("[shm]\nmax-pool-size = 1024")?;
    let tc = TestClient::with_config(config)?;
    let (mem, pool) = tc.create_pool(1024)?;
    let res = tc.send(pool, wl_shm_pool::Resize { size: 2048 });
    let Err(ClientError::ObjectError(e)) = res else {
        bail!("the pool grew beyond the configured limit");
    };
    tassert_eq!(e.class, ErrorClass::ClientResource);
    tassert_eq!(e.code, Some(wl_shm::INVALID_FD));
    drop(mem);
    Ok(())
}

#[test]
fn pool_only_grows() -> TestResult {
    let tc = TestClient::new()?;
    let (mem, pool) = tc.create_pool(4096)?;
    let obj = tc.get::<WlShmPool>(pool)?;
    let res = tc.send(pool, wl_shm_pool::Resize { size: 1024 });
    let Err(ClientError::ObjectError(e)) = res else {
        bail!("the pool shrank");
    };
    tassert_eq!(e.class, ErrorClass::ProtocolViolation);
    tassert_eq!(e.code, Some(wl_shm::INVALID_STRIDE));
    tassert_eq!(obj.size(), 4096);
    drop(mem);
    Ok(())
}

#[test]
fn resize_keeps_existing_buffers() -> TestResult {
    let tc = TestClient::new()?;
    let (mem, pool) = tc.create_pool(64)?;
    let small = tc.create_buffer(pool, 0, 4, 4, 16, ARGB8888)?;
    let mem = mem.grow(128)?;
    tc.send(pool, wl_shm_pool::Resize { size: 128 })?;
    tassert_eq!(tc.get::<WlShmPool>(pool)?.size(), 128);
    let large = tc.create_buffer(pool, 64, 4, 4, 16, ARGB8888)?;
    mem.write(0, &[0x30, 0x20, 0x10, 0x80]);
    mem.write(64, &[1, 2, 3, 4]);
    let small = tc.get::<WlBuffer>(small)?;
    let large = tc.get::<WlBuffer>(large)?;
    let pixels = small.read_pixels::<Argb8888>()?;
    tassert_eq!(
        pixels[0],
        Argb8888 {
            a: 0x80,
            r: 0x10,
            g: 0x20,
            b: 0x30,
        }
    );
    tassert_eq!(large.read_pixels::<u32>()?[0], 0x04030201);
    Ok(())
}

#[test]
fn buffer_span_must_fit() -> TestResult {
    let cases = [
        // offset, width, height, stride, fits
        (0, 64, 16, 256, true),
        (4, 64, 16, 256, false),
        (0, 64, 17, 256, false),
        (256, 64, 15, 256, true),
        (0, 65, 16, 256, false),
    ];
    for (offset, width, height, stride, fits) in cases {
        let tc = TestClient::new()?;
        let (_mem, pool) = tc.create_pool(4096)?;
        let id: WlBufferId = tc.id();
        let res = tc.send(
            pool,
            wl_shm_pool::CreateBuffer {
                id,
                offset,
                width,
                height,
                stride,
                format: ARGB8888,
            },
        );
        tassert_eq!(res.is_ok(), fits);
        tassert_eq!(tc.client.lookup::<WlBuffer>(id).is_ok(), fits);
        if !fits {
            let events = tc.events();
            let Some(error) = events.error() else {
                bail!("no error was posted");
            };
            tassert_eq!(error.object_id, ObjectId::from(pool));
            tassert_eq!(error.code, wl_shm::INVALID_STRIDE);
        }
    }
    Ok(())
}

#[test]
fn unknown_format_is_rejected() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(64)?;
    if tc.create_buffer(pool, 0, 4, 4, 16, 0x3432_4241).is_ok() {
        bail!("an unknown format was accepted");
    }
    let events = tc.events();
    let Some(error) = events.error() else {
        bail!("no error was posted");
    };
    tassert_eq!(error.code, wl_shm::INVALID_FORMAT);
    Ok(())
}

#[test]
fn buffers_outlive_their_pool() -> TestResult {
    let tc = TestClient::new()?;
    let (mem, pool) = tc.create_pool(64)?;
    let buffer = tc.create_buffer(pool, 0, 4, 4, 16, XRGB8888)?;
    tc.send(pool, wl_shm_pool::Destroy {})?;
    if tc.client.lookup::<WlShmPool>(pool).is_ok() {
        bail!("the pool is still bound");
    }
    mem.write(0, &[9]);
    let buffer = tc.get::<WlBuffer>(buffer)?;
    tassert_eq!(buffer.read_pixels::<u8>()?[0], 9);
    let events = tc.events();
    let deleted: Vec<_> = events
        .of::<wl_display::DeleteId>()
        .iter()
        .map(|e| e.id)
        .collect();
    tassert_eq!(deleted, vec![pool.raw()]);
    Ok(())
}

#[test]
fn buffer_release_and_destroy() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(64)?;
    let id = tc.create_buffer(pool, 0, 4, 4, 16, ARGB8888)?;
    let buffer = tc.get::<WlBuffer>(id)?;
    buffer.send_release();
    tassert_eq!(tc.events().of::<wl_buffer::Release>().len(), 1);
    tc.send(id, wl_buffer::Destroy {})?;
    tassert_eq!(buffer.destroyed(), true);
    buffer.send_release();
    tassert_eq!(tc.events().of::<wl_buffer::Release>().len(), 0);
    Ok(())
}

#[test]
fn unsealed_memory_is_guarded() -> TestResult {
    let tc = TestClient::new()?;
    let mem = TestMem::unsealed(4096)?;
    let pool: WlShmPoolId = tc.create_pool_from(&mem, 4096)?;
    let buffer = tc.create_buffer(pool, 0, 16, 16, 64, ARGB8888)?;
    uapi::ftruncate(mem.fd.raw(), 0)?;
    let buffer = tc.get::<WlBuffer>(buffer)?;
    let Err(e) = buffer.read_pixels::<Argb8888>() else {
        bail!("reading truncated memory succeeded");
    };
    tassert_eq!(e.class(), ErrorClass::ClientResource);
    Ok(())
}

#[test]
fn snapshots_are_isolated() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(4096)?;
    let first = tc.create_buffer(pool, 0, 16, 16, 64, ARGB8888)?;
    let second = tc.create_buffer(pool, 1024, 16, 16, 64, ARGB8888)?;
    let region = tc.create_region(&[(0, 0, 4, 4)])?;
    let surface = tc.create_surface()?;
    tc.send(
        surface,
        wl_surface::Attach {
            buffer: first,
            x: 0,
            y: 0,
        },
    )?;
    tc.send(surface, wl_surface::SetOpaqueRegion { region })?;
    tc.send(
        surface,
        wl_surface::Damage {
            x: 0,
            y: 0,
            width: 2,
            height: 2,
        },
    )?;
    tc.send(surface, wl_surface::Commit {})?;
    tc.send(
        surface,
        wl_surface::Attach {
            buffer: second,
            x: 0,
            y: 0,
        },
    )?;
    tc.send(
        surface,
        wl_surface::Damage {
            x: 8,
            y: 8,
            width: 8,
            height: 8,
        },
    )?;
    tc.send(
        region,
        wl_region::Add {
            x: 0,
            y: 0,
            width: 16,
            height: 16,
        },
    )?;
    tc.send(region, wl_region::Destroy {})?;
    let surface = tc.surface(surface)?;
    let Some(state) = surface.pop_state() else {
        bail!("no state was committed");
    };
    tassert_eq!(state.buffer_damage.rectangles(), vec![(0, 0, 2, 2)]);
    let Some(buffer) = &state.buffer else {
        bail!("the snapshot has no buffer");
    };
    tassert_eq!(buffer.id, first);
    let Some(opaque) = &state.opaque_region else {
        bail!("the snapshot has no opaque region");
    };
    tassert_eq!(opaque.rectangles(), vec![(0, 0, 4, 4)]);
    Ok(())
}

#[test]
fn frame_callbacks_are_carried_in_order() -> TestResult {
    let tc = TestClient::new()?;
    let surface = tc.create_surface()?;
    let a: WlCallbackId = tc.id();
    let b: WlCallbackId = tc.id();
    tc.send(surface, wl_surface::Frame { callback: a })?;
    tc.send(surface, wl_surface::Frame { callback: b })?;
    tc.send(surface, wl_surface::Commit {})?;
    tc.send(surface, wl_surface::Commit {})?;
    let surface = tc.surface(surface)?;
    let (Some(first), Some(second)) = (surface.pop_state(), surface.pop_state()) else {
        bail!("expected two states");
    };
    let ids: Vec<_> = first.frame_callbacks.iter().map(|cb| cb.id).collect();
    tassert_eq!(ids, vec![a, b]);
    tassert_eq!(second.frame_callbacks.len(), 0);
    tc.events();
    for cb in &first.frame_callbacks {
        cb.send_done(7)?;
        cb.send_done(8)?;
    }
    let events = tc.events();
    let done: Vec<_> = events
        .of::<wl_callback::Done>()
        .iter()
        .map(|e| (e.self_id, e.callback_data))
        .collect();
    tassert_eq!(done, vec![(a, 7), (b, 7)]);
    tassert_eq!(events.of::<wl_display::DeleteId>().len(), 2);
    if tc.client.lookup::<WlCallback>(a).is_ok() {
        bail!("the callback is still bound");
    }
    Ok(())
}

#[test]
fn surface_destroy_drops_queued_states() -> TestResult {
    let tc = TestClient::new()?;
    let id = tc.create_surface()?;
    tc.send(id, wl_surface::Commit {})?;
    let surface = tc.surface(id)?;
    tassert_eq!(surface.pending_states(), 1);
    tc.send(id, wl_surface::Destroy {})?;
    tassert_eq!(surface.pending_states(), 0);
    if tc.client.lookup::<WlSurface>(id).is_ok() {
        bail!("the surface is still bound");
    }
    Ok(())
}

#[test]
fn surface_destroy_releases_frame_callbacks() -> TestResult {
    let tc = TestClient::new()?;
    let surface = tc.create_surface()?;
    let committed: WlCallbackId = tc.id();
    let pending: WlCallbackId = tc.id();
    tc.send(surface, wl_surface::Frame { callback: committed })?;
    tc.send(surface, wl_surface::Commit {})?;
    tc.send(surface, wl_surface::Frame { callback: pending })?;
    tc.events();
    tc.send(surface, wl_surface::Destroy {})?;
    for cb in [committed, pending] {
        if tc.client.lookup::<WlCallback>(cb).is_ok() {
            bail!("callback {} is still bound", cb);
        }
    }
    let events = tc.events();
    let mut deleted: Vec<_> = events
        .of::<wl_display::DeleteId>()
        .iter()
        .map(|e| e.id)
        .collect();
    deleted.sort();
    tassert_eq!(deleted, vec![surface.raw(), committed.raw(), pending.raw()]);
    tassert_eq!(events.of::<wl_callback::Done>().len(), 0);
    tassert_eq!(tc.client.objects.len(), 1);
    Ok(())
}

#[test]
fn misaligned_stride_is_a_client_error() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(64)?;
    let id = tc.create_buffer(pool, 0, 1, 3, 5, ARGB8888)?;
    let buffer = tc.get::<WlBuffer>(id)?;
    let Err(e) = buffer.read_pixels::<Argb8888>() else {
        bail!("a 15 byte span was read as 4 byte pixels");
    };
    let WlBufferError::ShapeMismatch { pixel_size, len } = e else {
        bail!("unexpected error: {}", e);
    };
    tassert_eq!((pixel_size, len), (4, 15));
    tassert_eq!(e.class(), ErrorClass::ClientResource);
    tassert_eq!(e.class().is_fatal(), false);
    tassert_eq!(buffer.read_pixels::<u8>()?.len(), 15);
    Ok(())
}

#[test]
fn region_rejects_negative_extents() -> TestResult {
    let tc = TestClient::new()?;
    let region = tc.create_region(&[])?;
    let res = tc.send(
        region,
        wl_region::Subtract {
            x: 0,
            y: 0,
            width: -1,
            height: 1,
        },
    );
    let Err(e) = res else {
        bail!("negative extents were accepted");
    };
    tassert_eq!(e.class(), ErrorClass::ProtocolViolation);
    tassert_eq!(e.code(), None);
    Ok(())
}

#[test]
fn seat_announces_keyboard() -> TestResult {
    let tc = TestClient::new()?;
    let seat = tc.seat(7)?;
    let events = tc.events();
    let caps = events.of::<wl_seat::Capabilities>();
    tassert_eq!(caps.len(), 1);
    tassert_eq!(caps[0].capabilities, wl_seat::KEYBOARD);
    let names = events.of::<wl_seat::Name>();
    tassert_eq!(names.len(), 1);
    tassert_eq!(names[0].name.as_str(), "default");

    let res = tc.send(
        seat.id,
        wl_seat::GetPointer {
            id: WlPointerId::from_raw(100),
        },
    );
    let Err(e) = res else {
        bail!("a pointer was created");
    };
    tassert_eq!(e.code(), Some(wl_seat::MISSING_CAPABILITY));
    Ok(())
}

#[test]
fn seat_v1_has_no_name() -> TestResult {
    let tc = TestClient::new()?;
    tc.seat(1)?;
    let events = tc.events();
    tassert_eq!(events.of::<wl_seat::Capabilities>().len(), 1);
    tassert_eq!(events.of::<wl_seat::Name>().len(), 0);
    Ok(())
}

#[test]
fn keyboard_receives_keymap_and_events() -> TestResult {
    let config = CoreConfig::parse(
        r#"
            [seat]
            name = "seat0"
            keymap = "xkb_keymap {};"
            repeat-rate = 30
            repeat-delay = 250
        "#,
    )?;
    let tc = TestClient::with_config(config)?;
    let seat = tc.seat(7)?;
    tc.events();
    let kb: WlKeyboardId = tc.id();
    tc.send(seat.id, wl_seat::GetKeyboard { id: kb })?;
    let events = tc.events();
    let keymaps = events.of::<wl_keyboard::Keymap>();
    tassert_eq!(keymaps.len(), 1);
    tassert_eq!(keymaps[0].format, wl_keyboard::XKB_V1);
    tassert_eq!(keymaps[0].size, 15);
    let repeat = events.of::<wl_keyboard::RepeatInfo>();
    tassert_eq!(repeat.len(), 1);
    tassert_eq!((repeat[0].rate, repeat[0].delay), (30, 250));

    let surface = tc.create_surface()?;
    seat.keyboard_focus_enter(surface, &[30]);
    seat.key_event(1000, 30, wl_keyboard::RELEASED);
    seat.modifiers(1, 0, 0, 0);
    seat.keyboard_focus_leave(surface);
    let events = tc.events();
    let enter = events.of::<wl_keyboard::Enter>();
    tassert_eq!(enter.len(), 1);
    tassert_eq!(enter[0].keys.clone(), vec![30]);
    tassert_eq!(enter[0].surface, surface);
    let key = events.of::<wl_keyboard::Key>();
    tassert_eq!((key[0].key, key[0].state), (30, wl_keyboard::RELEASED));
    tassert_eq!(key[0].serial > enter[0].serial, true);
    tassert_eq!(events.of::<wl_keyboard::Modifiers>().len(), 1);
    tassert_eq!(events.of::<wl_keyboard::Leave>().len(), 1);

    tc.send(kb, wl_keyboard::Release {})?;
    if tc.client.lookup::<WlKeyboard>(kb).is_ok() {
        bail!("the keyboard is still bound");
    }
    tassert_eq!(seat.keyboards().len(), 0);
    Ok(())
}

#[test]
fn keyboard_without_keymap() -> TestResult {
    let tc = TestClient::new()?;
    let seat = tc.seat(3)?;
    tc.events();
    let kb: WlKeyboardId = tc.id();
    tc.send(seat.id, wl_seat::GetKeyboard { id: kb })?;
    let events = tc.events();
    let keymaps = events.of::<wl_keyboard::Keymap>();
    tassert_eq!(keymaps.len(), 1);
    tassert_eq!(keymaps[0].format, wl_keyboard::NO_KEYMAP);
    tassert_eq!(events.of::<wl_keyboard::RepeatInfo>().len(), 0);
    Ok(())
}

#[test]
fn client_destroy_releases_everything() -> TestResult {
    let tc = TestClient::new()?;
    let (_mem, pool) = tc.create_pool(64)?;
    let buffer = tc.create_buffer(pool, 0, 4, 4, 16, ARGB8888)?;
    let surface = tc.create_surface()?;
    tc.send(
        surface,
        wl_surface::Attach {
            buffer,
            x: 0,
            y: 0,
        },
    )?;
    tc.send(surface, wl_surface::Commit {})?;
    let seat = tc.seat(7)?;
    tc.send(seat.id, wl_seat::GetKeyboard { id: tc.id() })?;
    let surface = tc.surface(surface)?;
    let buffer = Rc::downgrade(&tc.get::<WlBuffer>(buffer)?);
    let seat_ref = Rc::downgrade(&seat);
    drop(seat);
    tc.client.destroy();
    tassert_eq!(tc.client.objects.is_empty(), true);
    tassert_eq!(surface.pending_states(), 0);
    drop(surface);
    tassert_eq!(buffer.upgrade().is_none(), true);
    tassert_eq!(seat_ref.upgrade().is_none(), true);
    Ok(())
}
