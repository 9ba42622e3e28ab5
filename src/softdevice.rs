//! Nordic SoftDevice S140 - stack enable and the advertising-set radio.
//!
//! The beacon only needs one legacy advertising set, so the radio talks to
//! the SoftDevice GAP API directly rather than through the async
//! `peripheral::advertise` helpers: configure once, then start and stop the
//! same handle on demand.

use core::mem;
use core::ptr;

use defmt::{info, warn};
use nrf_beacon::advertising::{AdvertisingType, FilterPolicy};
use nrf_beacon::config::LEGACY_ADV_DATA_MAX;
use nrf_beacon::{AdvHandle, AdvertisingConfig, Radio, RadioError, TxPowerRole};
use nrf_softdevice::{raw, RawError, Softdevice};
use static_cell::StaticCell;

/// Advertising data must stay valid for as long as the set is configured.
static ADV_DATA: StaticCell<[u8; LEGACY_ADV_DATA_MAX]> = StaticCell::new();

/// Enable the SoftDevice with the LF clock on the external crystal.
///
/// Must be called exactly once, before any raw `sd_*` call.
pub fn enable() -> &'static mut Softdevice {
    let config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        ..Default::default()
    };

    Softdevice::enable(&config)
}

fn check(ret: u32) -> Result<(), RadioError> {
    RawError::convert(ret).map_err(|e| {
        warn!("SoftDevice call failed: {:?}", e);
        RadioError::Raw(ret)
    })
}

/// [`Radio`] over the SoftDevice GAP advertising API.
pub struct SoftdeviceRadio {
    _sd: &'static Softdevice,
    adv_data: &'static mut [u8; LEGACY_ADV_DATA_MAX],
}

impl SoftdeviceRadio {
    /// Taking the enabled SoftDevice guarantees the stack is up.
    ///
    /// Must be called only once (the advertising buffer is a `StaticCell`).
    pub fn new(sd: &'static Softdevice) -> Self {
        Self {
            _sd: sd,
            adv_data: ADV_DATA.init([0u8; LEGACY_ADV_DATA_MAX]),
        }
    }
}

impl Radio for SoftdeviceRadio {
    fn configure(
        &mut self,
        data: &[u8],
        config: &AdvertisingConfig,
    ) -> Result<AdvHandle, RadioError> {
        if data.len() > self.adv_data.len() {
            return Err(RadioError::PayloadTooLarge);
        }
        self.adv_data[..data.len()].copy_from_slice(data);

        let mut params: raw::ble_gap_adv_params_t = unsafe { mem::zeroed() };
        params.properties.type_ = match config.kind {
            AdvertisingType::NonConnectableNonScannableUndirected => {
                raw::BLE_GAP_ADV_TYPE_NONCONNECTABLE_NONSCANNABLE_UNDIRECTED as u8
            }
        };
        params.p_peer_addr = ptr::null();
        params.filter_policy = match config.filter_policy {
            FilterPolicy::Any => raw::BLE_GAP_ADV_FP_ANY as u8,
        };
        params.interval = config.interval;
        params.duration = config.duration;
        params.primary_phy = raw::BLE_GAP_PHY_1MBPS as u8;

        let adv_data = raw::ble_gap_adv_data_t {
            adv_data: raw::ble_data_t {
                p_data: self.adv_data.as_mut_ptr(),
                len: data.len() as u16,
            },
            scan_rsp_data: raw::ble_data_t {
                p_data: ptr::null_mut(),
                len: 0,
            },
        };

        let mut handle = raw::BLE_GAP_ADV_SET_HANDLE_NOT_SET as u8;
        check(unsafe { raw::sd_ble_gap_adv_set_configure(&mut handle, &adv_data, &params) })?;
        Ok(AdvHandle(handle))
    }

    fn start(&mut self, handle: AdvHandle, conn_cfg_tag: u8) -> Result<(), RadioError> {
        check(unsafe { raw::sd_ble_gap_adv_start(handle.0, conn_cfg_tag) })
    }

    fn stop(&mut self, handle: AdvHandle) -> Result<(), RadioError> {
        check(unsafe { raw::sd_ble_gap_adv_stop(handle.0) })
    }

    fn set_tx_power(
        &mut self,
        role: TxPowerRole,
        handle: AdvHandle,
        dbm: i8,
    ) -> Result<(), RadioError> {
        let role = match role {
            TxPowerRole::Advertising => raw::BLE_GAP_TX_POWER_ROLE_ADV as u8,
        };
        check(unsafe { raw::sd_ble_gap_tx_power_set(role, handle.0 as u16, dbm) })?;
        info!("TX Power set to {} dBm", dbm);
        Ok(())
    }
}
