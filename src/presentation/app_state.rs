// Application state for HTTP handlers
use crate::application::efficiency_service::EfficiencyService;
use crate::application::low_soc_service::LowSocService;
use crate::application::soc_service::SocService;
use crate::application::vehicle_service::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub vehicle_service: VehicleService,
    pub low_soc_service: LowSocService,
    pub soc_service: SocService,
    pub efficiency_service: EfficiencyService,
    pub default_bin_minutes: u32,
}
