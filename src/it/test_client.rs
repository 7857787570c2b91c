use {
    crate::{
        client::{Client, ClientError, Implementation},
        clientmem,
        config::CoreConfig,
        ifs::{
            wl_compositor::{WL_COMPOSITOR_VERSION, WlCompositor},
            wl_seat::{WL_SEAT_VERSION, WlSeat},
            wl_shm::{WL_SHM_VERSION, WlShm},
            wl_surface::WlSurface,
        },
        it::{test_error::TestResult, test_mem::TestMem},
        object::ObjectId,
        state::State,
        wire::{
            DynEvent, Event, Request, WlBufferId, WlCompositorId, WlRegionId, WlShmId,
            WlShmPoolId, WlSurfaceId, wl_compositor, wl_display, wl_region, wl_shm,
            wl_shm_pool,
        },
    },
    std::{cell::Cell, rc::Rc},
};

/// A client whose requests are dispatched directly, without a transport.
pub struct TestClient {
    pub state: Rc<State>,
    pub client: Rc<Client>,
    next_id: Cell<u32>,
    compositor: Cell<Option<WlCompositorId>>,
    shm: Cell<Option<WlShmId>>,
}

impl TestClient {
    pub fn new() -> TestResult<Self> {
        Self::with_config(CoreConfig::default())
    }

    pub fn with_config(config: CoreConfig) -> TestResult<Self> {
        clientmem::init()?;
        let state = State::new(config)?;
        let client = Client::new(&state);
        Ok(Self {
            state,
            client,
            next_id: Cell::new(2),
            compositor: Cell::new(None),
            shm: Cell::new(None),
        })
    }

    pub fn id<T: From<ObjectId>>(&self) -> T {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ObjectId::from_raw(id).into()
    }

    pub fn send(
        &self,
        id: impl Into<ObjectId>,
        request: impl Into<Request>,
    ) -> Result<(), ClientError> {
        self.client.dispatch(id, request)
    }

    pub fn get<T: Implementation>(&self, id: T::Id) -> TestResult<Rc<T>> {
        Ok(self.client.lookup::<T>(id)?)
    }

    pub fn compositor(&self) -> TestResult<WlCompositorId> {
        if let Some(id) = self.compositor.get() {
            return Ok(id);
        }
        let id = self.id();
        WlCompositor::bind(&self.client, id, WL_COMPOSITOR_VERSION)?;
        self.compositor.set(Some(id));
        Ok(id)
    }

    pub fn shm(&self) -> TestResult<WlShmId> {
        if let Some(id) = self.shm.get() {
            return Ok(id);
        }
        let id = self.id();
        WlShm::bind(&self.client, id, WL_SHM_VERSION)?;
        self.shm.set(Some(id));
        Ok(id)
    }

    pub fn seat(&self, version: u32) -> TestResult<Rc<WlSeat>> {
        Ok(WlSeat::bind(&self.client, self.id(), version.min(WL_SEAT_VERSION))?)
    }

    pub fn create_surface(&self) -> TestResult<WlSurfaceId> {
        let compositor = self.compositor()?;
        let id = self.id();
        self.send(compositor, wl_compositor::CreateSurface { id })?;
        Ok(id)
    }

    pub fn surface(&self, id: WlSurfaceId) -> TestResult<Rc<WlSurface>> {
        self.get(id)
    }

    pub fn create_region(&self, rects: &[(i32, i32, i32, i32)]) -> TestResult<WlRegionId> {
        let compositor = self.compositor()?;
        let id = self.id();
        self.send(compositor, wl_compositor::CreateRegion { id })?;
        for &(x, y, width, height) in rects {
            self.send(
                id,
                wl_region::Add {
                    x,
                    y,
                    width,
                    height,
                },
            )?;
        }
        Ok(id)
    }

    pub fn create_pool(&self, size: usize) -> TestResult<(Rc<TestMem>, WlShmPoolId)> {
        let mem = TestMem::new(size)?;
        let id = self.create_pool_from(&mem, size as i32)?;
        Ok((mem, id))
    }

    pub fn create_pool_from(&self, mem: &TestMem, size: i32) -> TestResult<WlShmPoolId> {
        let shm = self.shm()?;
        let id = self.id();
        self.send(
            shm,
            wl_shm::CreatePool {
                id,
                fd: mem.fd.clone(),
                size,
            },
        )?;
        Ok(id)
    }

    pub fn create_buffer(
        &self,
        pool: WlShmPoolId,
        offset: i32,
        width: i32,
        height: i32,
        stride: i32,
        format: u32,
    ) -> TestResult<WlBufferId> {
        let id = self.id();
        self.send(
            pool,
            wl_shm_pool::CreateBuffer {
                id,
                offset,
                width,
                height,
                stride,
                format,
            },
        )?;
        Ok(id)
    }

    /// Drains the event queue.
    pub fn events(&self) -> Events {
        Events(self.client.take_events())
    }
}

pub struct Events(pub Vec<DynEvent>);

impl Events {
    pub fn of<T: Event>(&self) -> Vec<&T> {
        self.0
            .iter()
            .filter_map(|e| e.as_any().downcast_ref::<T>())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn error(&self) -> Option<&wl_display::Error> {
        self.of::<wl_display::Error>().into_iter().next()
    }
}
