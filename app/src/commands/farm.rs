use flock::types::{Address, FarmInfo};

use crate::state::{AppState, FarmInfoData};

pub fn get_farm_info(state: &AppState) -> Option<FarmInfoData> {
    let store = state.store.lock().unwrap();
    store.farm_info().map(|info| FarmInfoData {
        first_name: info.first_name.clone(),
        last_name: info.last_name.clone(),
        farm_name: info.farm_name.clone(),
        street1: info.address.street1.clone(),
        street2: info.address.street2.clone(),
        city: info.address.city.clone(),
        state: info.address.state.clone(),
        zip_code: info.address.zip_code.clone(),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn save_farm_info(
    state: &AppState,
    first_name: String,
    last_name: String,
    farm_name: String,
    street1: String,
    street2: String,
    city: String,
    state_code: String,
    zip_code: String,
) -> Result<(), String> {
    if farm_name.trim().is_empty() {
        return Err("Please enter a farm name".to_string());
    }

    let address = Address {
        street1: street1.trim().to_string(),
        street2: {
            let trimmed = street2.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        },
        city: city.trim().to_string(),
        state: state_code.trim().to_uppercase(),
        zip_code: zip_code.trim().to_string(),
    };
    if !Address::is_valid_zip(&address.zip_code) {
        return Err("Please enter a valid ZIP code".to_string());
    }

    let info = FarmInfo {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        farm_name: farm_name.trim().to_string(),
        address,
    };

    let mut store = state.store.lock().unwrap();
    store.set_farm_info(info).map_err(|e| e.to_string())
}
